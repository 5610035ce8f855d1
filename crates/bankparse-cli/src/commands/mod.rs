pub mod extract;
pub mod run;
