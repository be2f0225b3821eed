pub mod constants;
pub mod reference;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
