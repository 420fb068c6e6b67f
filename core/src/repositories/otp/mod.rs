pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

#[cfg(test)]
mod tests;

pub use mock::MockOtpRepository;
pub use r#trait::OtpRepository;
