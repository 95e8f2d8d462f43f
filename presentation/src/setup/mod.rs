//! Interactive debate setup on the terminal

mod interactive;

pub use interactive::{
    BackendChoice, InteractiveSetup, SetupDefaults, parse_backend_choice, parse_char_limit,
    parse_participant_count, parse_round_count,
};
