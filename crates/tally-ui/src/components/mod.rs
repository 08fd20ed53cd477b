pub mod game_screen;
pub mod player_card;
pub mod setup_screen;
