mod clipboard;

pub use clipboard::capture_selected_text;
