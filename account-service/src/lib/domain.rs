pub mod auth;
pub mod file;
pub mod mail;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;
