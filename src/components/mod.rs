pub mod product_card;
pub mod product_modal;
