//! Per-face color palette (gruvbox-derived, sRGB channels in `[0,1]`).

/// Top face (y = -0.5 after centering).
pub const TOP: [f32; 3] = [0.271, 0.522, 0.533]; // blue #458588
/// Bottom face (y = 0.5 after centering).
pub const BOTTOM: [f32; 3] = [0.800, 0.141, 0.114]; // red #cc241d
/// Left cap face (x = -stretch/2).
pub const LEFT: [f32; 3] = [0.596, 0.592, 0.102]; // green #98971a
/// Right cap face (x = stretch/2).
pub const RIGHT: [f32; 3] = [0.694, 0.384, 0.525]; // purple #b16286
/// Front face (z = -0.5 after centering).
pub const FRONT: [f32; 3] = [0.843, 0.600, 0.129]; // yellow #d79921
/// Back face (z = 0.5 after centering).
pub const BACK: [f32; 3] = [0.408, 0.616, 0.416]; // aqua #689d6a
