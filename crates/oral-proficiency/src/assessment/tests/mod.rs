mod common;
mod feedback;
mod routing;
