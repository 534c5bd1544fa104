/// UI module exports
pub mod confirm_modal;
pub mod item_card;
pub mod side_panel;
pub mod toolbar;
