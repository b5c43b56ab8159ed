pub mod prepare;
pub mod translate;

/// Extension of the simulation input files written by [`prepare`].
pub const EGSINP_EXT: &str = "egsinp";

/// Extension of the phase space files consumed and produced by [`translate`].
pub const PHASESPACE_EXT: &str = "egsphsp1";
