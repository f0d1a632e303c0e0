pub mod health;
pub mod middleman;
pub mod shell;
