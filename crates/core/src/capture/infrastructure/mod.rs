pub mod capture_session;
pub mod image_dir;
