use anyhow::anyhow;
use anyhow::Error;
use yew::format::Json;
use yew::prelude::*;
use yew::services::fetch::FetchTask;

use super::api::*;
use super::state::ViewState;
use super::util::format_timestamp;

/// Display treatment for a status key. Unknown keys fall back to the neutral
/// treatment rather than breaking the render.
fn status_class(status_key: &str) -> &'static str {
    match status_key {
        "NotStarted" => "milestone-not-started",
        "InProgress" => "milestone-in-progress",
        "Completed" => "milestone-completed",
        _ => "milestone-not-started",
    }
}

fn view_milestone(milestone: &Milestone, link: &ComponentLink<MilestonesComponent>) -> Html {
    use MilestonesComponentMsg::*;
    let id = milestone.id;

    html! {
        <div class=classes!("milestoneBlock", status_class(milestone.status.key()))>
            <h3 class="milestoneTitle">{ &milestone.title }</h3>
            <p class="milestoneDescription">{ &milestone.description }</p>
            <p class="milestoneStatus">{ format!("Status: {}", milestone.status.key()) }</p>
            <p class="milestoneDate">{ format!("Completion Date: {}", format_timestamp(milestone.completion_date)) }</p>
            <div class="milestoneControls">
                { Status::ALL.iter().map(|target| {
                    let target = *target;
                    html! {
                        <button class="statusButton" onclick=link.callback(move |_| SetStatus(id, target))>{ target.label() }</button>
                    }
                }).collect::<Html>() }
                <button class="milestoneDelete" onclick=link.callback(move |_| DeleteMilestone(id))>{ "Delete" }</button>
            </div>
        </div>
    }
}

fn into_result<T>(response: JsonFetchResponse<T>, operation: &'static str) -> Result<T, Error> {
    let (meta, Json(body)) = response.into_parts();

    if meta.status.is_success() {
        body
    } else {
        Err(anyhow!("{} failed with status {}", operation, meta.status))
    }
}

#[derive(Debug)]
pub enum MilestonesComponentMsg {
    UpdateMilestones,
    ReceivedMilestones(Result<Vec<Milestone>, Error>),
    CreateMilestone,
    CreateCompleted(Result<String, Error>),
    SetStatus(MilestoneId, Status),
    StatusUpdateCompleted(Result<String, Error>),
    DeleteMilestone(MilestoneId),
    DeleteCompleted(Result<String, Error>),
    EditTitle(String),
    EditDescription(String),
    EditCompletionDate(String),
}

#[derive(Properties, Clone)]
pub struct MilestonesComponentProps {
    /// Remote-service handle; defaults to the `/api` root when the embedder
    /// does not supply one.
    #[prop_or_else(MilestoneClient::new)]
    pub client: MilestoneClient,
}

pub struct MilestonesComponent {
    _get_fetch_task: Option<FetchTask>,
    _create_fetch_task: Option<FetchTask>,
    _set_status_fetch_task: Option<FetchTask>,
    _delete_fetch_task: Option<FetchTask>,
    client: MilestoneClient,
    state: ViewState,
    link: ComponentLink<Self>,
}

impl MilestonesComponent {
    fn fetch_milestones(&mut self) -> Result<(), Error> {
        let callback = self
            .link
            .callback(|response: JsonFetchResponse<Vec<Milestone>>| {
                MilestonesComponentMsg::ReceivedMilestones(into_result(response, "get_milestones"))
            });

        let task = self.client.get_milestones(callback)?;

        self._get_fetch_task = Some(task);

        Ok(())
    }

    fn create_milestone(&mut self) -> Result<(), Error> {
        let request_object = self.state.draft.to_create_request()?;

        let callback = self.link.callback(|response: JsonFetchResponse<String>| {
            MilestonesComponentMsg::CreateCompleted(into_result(response, "create_milestone"))
        });

        let task = self.client.create_milestone(&request_object, callback)?;

        self._create_fetch_task = Some(task);

        Ok(())
    }

    fn set_status(&mut self, id: MilestoneId, status: Status) -> Result<(), Error> {
        let request_object = UpdateStatusRequest { id, status };

        let callback = self.link.callback(|response: JsonFetchResponse<String>| {
            MilestonesComponentMsg::StatusUpdateCompleted(into_result(
                response,
                "update_milestone_status",
            ))
        });

        let task = self
            .client
            .update_milestone_status(&request_object, callback)?;

        self._set_status_fetch_task = Some(task);

        Ok(())
    }

    fn delete_milestone(&mut self, id: MilestoneId) -> Result<(), Error> {
        let request_object = DeleteMilestoneRequest { id };

        let callback = self.link.callback(|response: JsonFetchResponse<String>| {
            MilestonesComponentMsg::DeleteCompleted(into_result(response, "remove_milestone"))
        });

        let task = self.client.remove_milestone(&request_object, callback)?;

        self._delete_fetch_task = Some(task);

        Ok(())
    }

    fn view_create_form(&self) -> Html {
        use MilestonesComponentMsg::*;

        html! {
            <form class="milestoneForm" onsubmit=self.link.callback(|event: FocusEvent| {
                event.prevent_default();
                CreateMilestone
            })>
                <h2>{ "Create New Milestone" }</h2>
                <label>{ "Title" }</label>
                <input
                    type="text"
                    placeholder="Milestone Title"
                    required=true
                    value=self.state.draft.title.clone()
                    oninput=self.link.callback(|input: InputData| EditTitle(input.value))
                />
                <label>{ "Description" }</label>
                <textarea
                    placeholder="Milestone Description"
                    required=true
                    value=self.state.draft.description.clone()
                    oninput=self.link.callback(|input: InputData| EditDescription(input.value))
                />
                <label>{ "Set Completion Date" }</label>
                <input
                    type="date"
                    required=true
                    value=self.state.draft.completion_date.clone()
                    onchange=self.link.batch_callback(|change: ChangeData| match change {
                        ChangeData::Value(value) => Some(EditCompletionDate(value)),
                        _ => None,
                    })
                />
                <button type="submit" class="createMilestone">{ "Create Milestone" }</button>
            </form>
        }
    }

    fn view_milestones(&self) -> Html {
        html! {
            <div class="milestones">
                <h2>{ "All Milestones" }</h2>
                { self.state.milestones.iter().map(|milestone| {
                    view_milestone(milestone, &self.link)
                }).collect::<Html>() }
            </div>
        }
    }
}

impl Component for MilestonesComponent {
    type Message = MilestonesComponentMsg;
    type Properties = MilestonesComponentProps;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        MilestonesComponent {
            _get_fetch_task: None,
            _create_fetch_task: None,
            _set_status_fetch_task: None,
            _delete_fetch_task: None,
            client: props.client,
            state: ViewState::new(),
            link,
        }
    }

    fn view(&self) -> Html {
        html! {
            <>
            { self.view_create_form() }
            { self.view_milestones() }
            </>
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        use MilestonesComponentMsg::*;
        match msg {
            UpdateMilestones => {
                if let Err(e) = self.fetch_milestones() {
                    log_error_to_js(e);
                }
                false
            }
            ReceivedMilestones(result) => match result {
                Ok(milestones) => {
                    self.state.replace_milestones(milestones);
                    true
                }
                Err(e) => {
                    log_error_to_js(e);
                    false
                }
            },
            CreateMilestone => {
                if let Err(e) = self.create_milestone() {
                    log_error_to_js(e);
                }
                false
            }
            CreateCompleted(result) => match result {
                Ok(_) => {
                    self.state.draft.clear();
                    self.link.send_message(UpdateMilestones);
                    true
                }
                Err(e) => {
                    log_error_to_js(e);
                    false
                }
            },
            SetStatus(id, status) => {
                if let Err(e) = self.set_status(id, status) {
                    log_error_to_js(e);
                }
                false
            }
            DeleteMilestone(id) => {
                if let Err(e) = self.delete_milestone(id) {
                    log_error_to_js(e);
                }
                false
            }
            StatusUpdateCompleted(result) | DeleteCompleted(result) => match result {
                Ok(_) => {
                    self.link.send_message(UpdateMilestones);
                    false
                }
                Err(e) => {
                    log_error_to_js(e);
                    false
                }
            },
            EditTitle(value) => {
                self.state.draft.title = value;
                false
            }
            EditDescription(value) => {
                self.state.draft.description = value;
                false
            }
            EditCompletionDate(value) => {
                self.state.draft.completion_date = value;
                false
            }
        }
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        true
    }

    fn rendered(&mut self, first_render: bool) {
        if first_render {
            self.link
                .send_message(MilestonesComponentMsg::UpdateMilestones);
        }
    }

    fn destroy(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_their_treatment() {
        assert_eq!(status_class("NotStarted"), "milestone-not-started");
        assert_eq!(status_class("InProgress"), "milestone-in-progress");
        assert_eq!(status_class("Completed"), "milestone-completed");
    }

    #[test]
    fn unknown_status_falls_back_to_neutral_treatment() {
        assert_eq!(status_class("Paused"), "milestone-not-started");
        assert_eq!(status_class(""), "milestone-not-started");
    }
}
