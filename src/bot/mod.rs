// Bot side: serve collected posts through a fixed set of chat commands.
//
// Only the parts with behaviour live here: the read-only post store and
// the command table. Chat transport and polling are left to whatever
// frontend drives `commands::dispatch`.

pub mod commands;
pub mod store;
