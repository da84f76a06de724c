//! Connectable publisher-endpoint representation and delivery contract.

use crate::directory::{InstanceRecord, INSTANCE_IPV4_ATTRIBUTE, INSTANCE_PORT_ATTRIBUTE};
use async_trait::async_trait;
use std::fmt::{Display, Formatter};

/// One connectable publisher address, formatted as `tcp://<ipv4>:<port>`.
///
/// The literal format is a compatibility contract: downstream consumers parse
/// it. Instances missing an address attribute produce an endpoint with the
/// corresponding component empty rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublisherEndpoint(String);

impl PublisherEndpoint {
    pub(crate) fn from_instance(instance: &InstanceRecord) -> Self {
        let ipv4 = instance
            .attributes
            .get(INSTANCE_IPV4_ATTRIBUTE)
            .map(String::as_str)
            .unwrap_or_default();
        let port = instance
            .attributes
            .get(INSTANCE_PORT_ATTRIBUTE)
            .map(String::as_str)
            .unwrap_or_default();

        Self(format!("tcp://{ipv4}:{port}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PublisherEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PublisherEndpoint> for String {
    fn from(endpoint: PublisherEndpoint) -> Self {
        endpoint.0
    }
}

/// Receiver for watch-loop deliveries.
///
/// Each invocation carries the full current endpoint snapshot for the watched
/// stream, never a diff. Invocations within one watch are strictly
/// sequential: the loop awaits the listener before fetching again.
#[async_trait]
pub trait EndpointListener: Send + Sync {
    async fn on_endpoints(&self, endpoints: Vec<PublisherEndpoint>);
}

#[cfg(test)]
mod tests {
    use super::PublisherEndpoint;
    use crate::directory::{InstanceRecord, INSTANCE_IPV4_ATTRIBUTE, INSTANCE_PORT_ATTRIBUTE};
    use std::collections::HashMap;

    fn instance_with_attributes(attributes: &[(&str, &str)]) -> InstanceRecord {
        InstanceRecord {
            id: "test-instance".to_string(),
            attributes: attributes
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    #[test]
    fn endpoint_formats_ipv4_and_port() {
        let instance = instance_with_attributes(&[
            (INSTANCE_IPV4_ATTRIBUTE, "1.2.3.4"),
            (INSTANCE_PORT_ATTRIBUTE, "5678"),
        ]);

        let endpoint = PublisherEndpoint::from_instance(&instance);
        assert_eq!(endpoint.as_str(), "tcp://1.2.3.4:5678");
        assert_eq!(endpoint.to_string(), "tcp://1.2.3.4:5678");
    }

    #[test]
    fn missing_attributes_degrade_to_empty_components() {
        let no_port = instance_with_attributes(&[(INSTANCE_IPV4_ATTRIBUTE, "1.2.3.4")]);
        assert_eq!(
            PublisherEndpoint::from_instance(&no_port).as_str(),
            "tcp://1.2.3.4:"
        );

        let no_address = InstanceRecord {
            id: "bare".to_string(),
            attributes: HashMap::new(),
        };
        assert_eq!(
            PublisherEndpoint::from_instance(&no_address).as_str(),
            "tcp://:"
        );
    }
}
