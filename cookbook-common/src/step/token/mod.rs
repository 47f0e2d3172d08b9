mod approve;

pub use approve::ApproveERC20SpenderStep;
