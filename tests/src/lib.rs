//! End-to-end checks of the query engine and scheduler against fake game
//! servers bound on loopback.

mod util;

mod query {
    mod integration;
}

mod scheduler {
    mod integration;
}
