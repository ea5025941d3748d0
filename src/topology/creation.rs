// License: MIT
// Copyright © 2026 The router-topology Authors

//! Methods for creating [`Topology`] instances, either empty or from given
//! routers and links.

use petgraph::stable_graph::StableUnGraph;

use crate::{Error, TopologyConfig};

use super::{NodeIndexMap, Topology};

/// `Topology` instantiation.
impl Topology {
    /// Creates a new, empty [`Topology`].
    pub fn new(config: TopologyConfig) -> Self {
        Self {
            graph: StableUnGraph::default(),
            node_indices: NodeIndexMap::new(),
            router_order: Vec::new(),
            links: Vec::new(),
            next_link_id: 0,
            config,
        }
    }

    /// Creates a new [`Topology`] from the given routers and links.
    ///
    /// Routers and links are added in iteration order, with the same checks
    /// as [`add_router`][Topology::add_router] and
    /// [`add_link`][Topology::add_link], except that blank router names are
    /// rejected instead of ignored.
    ///
    /// Returns the first error encountered.
    pub fn try_new<R, L, S>(routers: R, links: L, config: TopologyConfig) -> Result<Self, Error>
    where
        R: IntoIterator<Item = S>,
        L: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut topology = Self::new(config);

        for router in routers {
            let router = router.as_ref();
            if topology.add_router(router)?.is_none() {
                return Err(Error::invalid_topology(format!(
                    "Router names can't be blank: {:?}",
                    router
                )));
            }
        }
        for (a, b) in links {
            topology.add_link(a.as_ref(), b.as_ref())?;
        }

        topology.validate()?;

        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn routers_and_links() -> (Vec<&'static str>, Vec<(&'static str, &'static str)>) {
        let routers = vec!["r1", "r2", "r3", "r4"];
        let links = vec![("r1", "r2"), ("r2", "r3"), ("r3", "r4"), ("r4", "r1")];

        (routers, links)
    }

    #[test]
    fn test_router_validation() {
        let config = TopologyConfig::default();
        let (mut routers, links) = routers_and_links();

        let topology = Topology::try_new(routers.clone(), links.clone(), config.clone());
        assert!(topology.is_ok());
        let topology = topology.unwrap();
        assert_eq!(
            topology.routers().collect::<Vec<_>>(),
            vec!["r1", "r2", "r3", "r4"]
        );
        assert_eq!(topology.link_count(), 4);

        routers.push("r2");
        assert!(
            Topology::try_new(routers.clone(), links.clone(), config.clone())
                .is_err_and(|e| e == Error::duplicate_router("Router already exists: r2"))
        );

        routers.pop();
        routers.push("  ");
        assert!(
            Topology::try_new(routers.clone(), links.clone(), config.clone())
                .is_err_and(|e| e == Error::invalid_topology("Router names can't be blank: \"  \""))
        );

        routers.pop();
        routers.extend(["r5", "r6", "r7", "r8", "r9"]);
        assert!(
            Topology::try_new(routers.clone(), links.clone(), config.clone())
                .is_err_and(|e| e.kind() == ErrorKind::CapacityExceeded)
        );

        routers.truncate(3);
        assert!(
            Topology::try_new(routers.clone(), [], TopologyConfig::new(2).unwrap())
                .is_err_and(|e| e == Error::capacity_exceeded("Maximum 2 routers allowed."))
        );
    }

    #[test]
    fn test_link_validation() {
        let config = TopologyConfig::default();
        let (routers, mut links) = routers_and_links();

        links.push(("r2", "r2"));
        assert!(
            Topology::try_new(routers.clone(), links.clone(), config.clone())
                .is_err_and(|e| e
                    == Error::invalid_link("Link:(r2, r2) Can't connect a router to itself."))
        );

        links.pop();
        links.push(("r2", "r9"));
        assert!(
            Topology::try_new(routers.clone(), links.clone(), config.clone())
                .is_err_and(|e| e
                    == Error::unknown_router("Link:(r2, r9) Can't find a router named r9"))
        );

        links.pop();
        links.push(("r2", "r1"));
        assert!(
            Topology::try_new(routers.clone(), links.clone(), config.clone())
                .is_err_and(|e| e == Error::duplicate_link("Link:(r2, r1) already exists."))
        );

        links.pop();
        assert!(Topology::try_new(routers.clone(), links.clone(), config.clone()).is_ok());
    }

    #[test]
    fn test_empty() {
        let topology = Topology::default();
        assert!(topology.is_empty());
        assert_eq!(topology.link_count(), 0);
        assert_eq!(topology.config(), &TopologyConfig::default());
    }
}
