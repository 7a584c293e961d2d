/// UI module exports
pub mod components;
pub mod dom;
pub mod header;
pub mod pipeline;
pub mod popup;
pub mod state;
pub mod tab_list;
