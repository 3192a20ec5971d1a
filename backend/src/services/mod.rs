//! Page data and submission services for the Together Apart site

pub mod options;
pub mod pages;
pub mod submission;

pub use options::{OptionLoader, SubmitPageProps};
pub use pages::PageResolver;
pub use submission::{Acknowledgement, SubmissionReceipt, SubmissionService};
