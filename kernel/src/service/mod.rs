pub mod booking;
pub mod eligibility;

#[cfg(test)]
mod tests;
