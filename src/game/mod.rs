pub mod aquarium;
pub mod constants;
pub mod events;
pub mod game_loop;
pub mod hud;
pub mod level;
pub mod player;
pub mod state;
pub mod systems;
