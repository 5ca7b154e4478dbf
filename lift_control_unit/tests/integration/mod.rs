mod auto_calibration;
mod safety_interlock;
mod target_tracking;
