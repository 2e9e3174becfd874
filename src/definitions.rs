/// Number of nodes the parser keeps on the stack without allocating heap
/// memory.
pub const N_NODES_ON_STACK: usize = 32;

/// Number of pending operators the parser keeps on the stack without
/// allocating heap memory.
pub const N_OPS_ON_STACK: usize = 16;
