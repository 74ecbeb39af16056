mod bob;
mod donald;
mod kenny;
mod nihilist;

pub use bob::BobPolicy;
pub use donald::DonaldPolicy;
pub use kenny::KennyPolicy;
pub use nihilist::NihilistPolicy;
