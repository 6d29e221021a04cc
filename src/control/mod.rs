pub mod command;
pub mod emergency;
pub mod fault_injection;
pub mod fuel_managment;
pub mod mission;
pub mod safety;
pub mod spacecraft;
