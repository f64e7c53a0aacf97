//! The fixed object hierarchy the demo creates and then reads back.
//!
//! ```text
//! /            (directory root)
//! └── US       facet Directory, Name=US
//!     └── CA   facet Directory, Name=US.CA
//!         └── SF   facet File, Name=US.CA.SF, MetricAddress=aws-random-com
//! ```

use clouddir_client::{CreateObjectRequest, ObjectAttributesQuery};
use clouddir_types::{
    AttributeKV, ConsistencyLevel, DirectoryHandle, ObjectPath, SchemaArn, SchemaReference,
};

/// Facet for intermediate (container) objects.
pub const DIRECTORY_FACET: &str = "Directory";
/// Facet for leaf objects carrying a metric address.
pub const FILE_FACET: &str = "File";

/// Attributes read back from the leaf on every sampling iteration.
pub const LEAF_ATTRIBUTES: [&str; 2] = ["MetricAddress", "Name"];

/// Path of the leaf the latency loop reads by default.
pub const DEFAULT_LEAF_PATH: &str = "/US/CA/SF";

struct ObjectSpec {
    parent: &'static str,
    link_name: &'static str,
    facet: &'static str,
    attributes: &'static [(&'static str, &'static str)],
}

// Parents are written exactly as the service expects them; "/US/" keeps its
// trailing slash.
const HIERARCHY: [ObjectSpec; 3] = [
    ObjectSpec {
        parent: "/",
        link_name: "US",
        facet: DIRECTORY_FACET,
        attributes: &[("Name", "US")],
    },
    ObjectSpec {
        parent: "/US/",
        link_name: "CA",
        facet: DIRECTORY_FACET,
        attributes: &[("Name", "US.CA")],
    },
    ObjectSpec {
        parent: "/US/CA",
        link_name: "SF",
        facet: FILE_FACET,
        attributes: &[("Name", "US.CA.SF"), ("MetricAddress", "aws-random-com")],
    },
];

/// Create requests for the hierarchy, in the order they must be issued.
///
/// Each request carries the full facet binding and its complete attribute
/// list for `schema`.
#[must_use]
pub fn hierarchy_requests(directory: &DirectoryHandle, schema: &SchemaArn) -> Vec<CreateObjectRequest> {
    HIERARCHY
        .iter()
        .map(|spec| {
            let facet = SchemaReference::new(schema.clone(), spec.facet);
            CreateObjectRequest {
                directory: directory.clone(),
                attributes: spec
                    .attributes
                    .iter()
                    .map(|(name, value)| AttributeKV::string(&facet, name, *value))
                    .collect(),
                schema_facets: vec![facet],
                parent: ObjectPath::new(spec.parent),
                link_name: spec.link_name.to_string(),
            }
        })
        .collect()
}

/// Attribute read issued against the leaf on each sampling iteration.
#[must_use]
pub fn leaf_query(
    directory: &DirectoryHandle,
    schema: &SchemaArn,
    path: &ObjectPath,
    consistency: ConsistencyLevel,
) -> ObjectAttributesQuery {
    ObjectAttributesQuery {
        directory: directory.clone(),
        path: path.clone(),
        consistency,
        facet: SchemaReference::new(schema.clone(), FILE_FACET),
        attribute_names: LEAF_ATTRIBUTES.iter().map(ToString::to_string).collect(),
    }
}
