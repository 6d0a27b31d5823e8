mod answers;
mod common;
mod properties;
mod routing;
