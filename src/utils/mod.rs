pub(crate) mod async_task;

pub(crate) mod flight;

pub(crate) mod time;

pub mod util;

#[cfg(test)]
mod utils_test;
