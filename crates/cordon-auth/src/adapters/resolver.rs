use crate::ports::outbound::NodeIpResolver;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::net::IpAddr;

/// In-memory implementation of NodeIpResolver for testing and local runs
pub struct StaticNodeIpResolver {
    nodes: RwLock<HashMap<u16, IpAddr>>,
}

impl StaticNodeIpResolver {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_nodes(nodes: impl IntoIterator<Item = (u16, IpAddr)>) -> Self {
        Self {
            nodes: RwLock::new(nodes.into_iter().collect()),
        }
    }

    pub fn insert(&self, node_id: u16, ip: IpAddr) {
        self.nodes.write().insert(node_id, ip);
    }

    pub fn remove(&self, node_id: u16) -> Option<IpAddr> {
        self.nodes.write().remove(&node_id)
    }
}

impl Default for StaticNodeIpResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeIpResolver for StaticNodeIpResolver {
    fn get_node_ip(&self, node_id: u16) -> Option<IpAddr> {
        self.nodes.read().get(&node_id).copied()
    }
}
