pub mod submission;

pub use submission::{
    NewSubmission, StoredSubmission, SubmissionCreatedResponse, SubmissionInput, UploadedFile,
    ValidatedFields, SUBMISSION_SUCCESS_MESSAGE,
};
