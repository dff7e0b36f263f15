//=========================================================================
// Demo Game
//
// The one game shipped with the shell: a single rotating quad. Exists to
// exercise the full Application/Game contract end to end - GL resource
// setup in `start`, per-frame simulation in `update`, rendering in
// `draw`, cleanup in `stop`, and lifecycle reactions via `notification`.
//
//=========================================================================

mod quad;

pub use quad::SpinningQuad;
