pub mod auth_handler;
pub mod fixture_handler;
pub mod group_handler;
pub mod leaderboard_handler;
pub mod prediction_handler;
pub mod registration_handler;
pub mod rules_handler;
