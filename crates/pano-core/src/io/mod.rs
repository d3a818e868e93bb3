pub mod image_io;

pub use image_io::{
    load_frame, load_frames_from_dir, parse_angle_from_name, save_panorama, scan_dir,
    DirectorySource,
};
