//! Projects bind a local workspace to one remote repository and the
//! credential used to call the issue tracker on its behalf.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
