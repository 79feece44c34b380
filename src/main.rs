//! Jaringan: networking-concepts explorer. Runs the network_explorer app.

use bevy::prelude::AppExit;
use network_explorer::prelude::*;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();
    let route = std::env::args().nth(1);
    let page = initial_page(route.as_deref());

    NetworkExplorerBuilder::new()
        .initial_page(page)
        .build()
        .run()
}
