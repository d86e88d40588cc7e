
/// GPS L1 C/A signal generation: ranging codes and the IF sample model
pub mod gps_l1_ca;
