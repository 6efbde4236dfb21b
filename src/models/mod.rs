mod form;
mod submission;

pub use form::{Form, FormSummary};
pub use submission::{FormSubmission, SubmissionSummary, SubmissionWithForm};
