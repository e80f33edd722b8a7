use crate::SubmissionResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a form field.
    FieldChanged { name: String, value: String },
    /// User clicked Next.
    NextClicked,
    /// User clicked Previous.
    PrevClicked,
    /// User clicked Submit Application.
    SubmitClicked,
    /// Boundary call for the pending submission returned.
    SubmissionFinished(SubmissionResult),
    /// A job chosen earlier was restored from the local store.
    SelectedJobRestored { title: String },
    /// First post-success timer fired.
    RedirectNoticeDue,
    /// Second post-success timer fired; time to leave the page.
    RedirectDue,
}
