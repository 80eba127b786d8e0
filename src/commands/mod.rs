pub mod protect;
