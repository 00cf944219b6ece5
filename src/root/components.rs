use yew::prelude::*;

use crate::milestones::components::MilestonesComponent;

pub struct RootComponent {}

impl Component for RootComponent {
    type Message = ();
    type Properties = ();

    fn create(_props: Self::Properties, _link: ComponentLink<Self>) -> Self {
        Self {}
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        false
    }

    fn update(&mut self, _: Self::Message) -> ShouldRender {
        false
    }

    fn view(&self) -> Html {
        html! {
            <div class="app">
                <h1 class="appTitle">{ "Project Milestone Tracker" }</h1>
                <MilestonesComponent />
            </div>
        }
    }
}
