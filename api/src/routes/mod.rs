mod health;
mod note;

pub use health::health_check;
pub use note::{create_note, delete_note, get_note, list_notes, update_note};
