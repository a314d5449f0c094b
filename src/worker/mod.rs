pub mod handler;
pub mod runner;

#[cfg(test)]
mod tests;
