pub mod smtp;
pub mod template;

pub use smtp::SmtpMailer;
