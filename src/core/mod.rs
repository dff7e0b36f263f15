//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the shell:
//
// - `input`    - the polled input cache and its data model
// - `game`     - the capability contract the frame loop drives
// - `clock`    - frame delta timing
// - `defaults` - compiled-in configuration constants
//
// Nothing in here touches winit or OpenGL directly; the `platform`
// module feeds these systems and the `Application` facade ties them
// together.
//
//=========================================================================

pub mod clock;
pub mod defaults;
pub mod game;
pub mod input;
