//! Layout constants shared by the GUI components

pub const ITEM_SPACING: f32 = 4.0;
pub const SECTION_SPACING: f32 = 12.0;

pub const BUTTON_WIDTH: f32 = 110.0;
pub const TIME_FIELD_WIDTH: f32 = 72.0;
pub const NAME_FIELD_WIDTH: f32 = 140.0;
pub const PATH_FIELD_WIDTH: f32 = 180.0;
