pub mod kinematics;
pub mod navigation;
