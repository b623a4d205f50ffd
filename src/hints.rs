//! Compiled-in root name server hints.
//!
//! The 13 IANA root servers are the entry points for every iterative walk.
//! Selection is uniform random so load spreads across the set and a single
//! poisoned or dead root does not dominate.

use std::net::Ipv4Addr;

use rand::Rng;

/// One root server: hostname and IPv4 address.
#[derive(Debug, Clone, Copy)]
pub struct RootHint {
    pub label: &'static str,
    pub ipv4: Ipv4Addr,
}

pub static ROOT_HINTS: &[RootHint] = &[
    RootHint { label: "a.root-servers.net", ipv4: Ipv4Addr::new(198, 41, 0, 4) },
    RootHint { label: "b.root-servers.net", ipv4: Ipv4Addr::new(199, 9, 14, 201) },
    RootHint { label: "c.root-servers.net", ipv4: Ipv4Addr::new(192, 33, 4, 12) },
    RootHint { label: "d.root-servers.net", ipv4: Ipv4Addr::new(199, 7, 91, 13) },
    RootHint { label: "e.root-servers.net", ipv4: Ipv4Addr::new(192, 203, 230, 10) },
    RootHint { label: "f.root-servers.net", ipv4: Ipv4Addr::new(192, 5, 5, 241) },
    RootHint { label: "g.root-servers.net", ipv4: Ipv4Addr::new(192, 112, 36, 4) },
    RootHint { label: "h.root-servers.net", ipv4: Ipv4Addr::new(198, 97, 190, 53) },
    RootHint { label: "i.root-servers.net", ipv4: Ipv4Addr::new(192, 36, 148, 17) },
    RootHint { label: "j.root-servers.net", ipv4: Ipv4Addr::new(192, 58, 128, 30) },
    RootHint { label: "k.root-servers.net", ipv4: Ipv4Addr::new(193, 0, 14, 129) },
    RootHint { label: "l.root-servers.net", ipv4: Ipv4Addr::new(199, 7, 83, 42) },
    RootHint { label: "m.root-servers.net", ipv4: Ipv4Addr::new(202, 12, 27, 33) },
];

/// Picks one root server uniformly at random.
pub fn random_root() -> &'static RootHint {
    let index = rand::thread_rng().gen_range(0..ROOT_HINTS.len());
    &ROOT_HINTS[index]
}
