//! End-to-end tests for `into_map` and `#[derive(IntoMap)]`.

#[cfg(test)]
mod derive;
