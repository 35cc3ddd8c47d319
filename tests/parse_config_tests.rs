//! Integration tests for parsing a complete slurm.conf

use slurm2json::{parse_config, ParseError};

const SHERLOCK: &str = include_str!("fixtures/sherlock.conf");

#[test]
fn test_sherlock_cluster_name() {
    let cluster = parse_config(SHERLOCK).unwrap();
    assert_eq!(cluster.name, "sherlock");
}

#[test]
fn test_sherlock_node_order() {
    let cluster = parse_config(SHERLOCK).unwrap();
    let names: Vec<_> = cluster.nodes.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "sh-1", "sh-2", "sh-3", "sh-4", "gpu-21", "gpu-22", "gpu-23", "bigmem1", "login1"
        ]
    );
}

#[test]
fn test_sherlock_node_attributes() {
    let cluster = parse_config(SHERLOCK).unwrap();

    let sh1 = cluster.node("sh-1").unwrap();
    assert_eq!(sh1.attributes["CPUs"], "16");
    assert_eq!(sh1.attributes["RealMemory"], "64000");
    assert_eq!(sh1.attributes["Weight"], "10");
    assert_eq!(sh1.attributes["Feature"], "\"cpu,ssd\"");
    assert!(!sh1.attributes.contains_key("State"));

    let gpu = cluster.node("gpu-22").unwrap();
    assert_eq!(gpu.attributes["Gres"], "gpu:4");
    assert_eq!(gpu.partitions, vec!["gpu"]);
}

#[test]
fn test_sherlock_cross_registration() {
    let cluster = parse_config(SHERLOCK).unwrap();

    assert_eq!(cluster.node("sh-1").unwrap().partitions, vec!["normal"]);
    assert_eq!(
        cluster.node("sh-3").unwrap().partitions,
        vec!["normal", "owners"]
    );
    assert_eq!(
        cluster.node("gpu-21").unwrap().partitions,
        vec!["gpu", "owners"]
    );

    // login1 only appears in a partition node list
    let login = cluster.node("login1").unwrap();
    assert_eq!(login.partitions, vec!["owners"]);
    assert!(login.attributes.is_empty());
}

#[test]
fn test_sherlock_partitions() {
    let cluster = parse_config(SHERLOCK).unwrap();
    let names: Vec<_> = cluster.partitions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["normal", "gpu", "owners"]);

    let normal = cluster.partition("normal").unwrap();
    assert_eq!(normal.max_nodes, 4);
    assert_eq!(normal.attributes["DefaultTime"], "2:00:00");
    assert_eq!(normal.attributes["DefMemPerCPU"], "4000");
    assert_eq!(normal.attributes["MaxMemPerCPU"], "8000");

    assert_eq!(cluster.partition("gpu").unwrap().attributes["AllowQos"], "gpu,normal");
    assert_eq!(cluster.partition("owners").unwrap().max_nodes, 6);
}

#[test]
fn test_sherlock_skipped_partition_leaves_no_trace() {
    let cluster = parse_config(SHERLOCK).unwrap();
    assert!(cluster.partition("test-queue").is_none());
    assert!(cluster
        .nodes
        .values()
        .all(|node| !node.partitions.iter().any(|p| p == "test-queue")));
    assert!(cluster.partition("DEFAULT").is_none());
    assert!(cluster.node("DEFAULT").is_none());
}

#[test]
fn test_sherlock_features() {
    let cluster = parse_config(SHERLOCK).unwrap();
    let keys: Vec<_> = cluster.features.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["normal", "owners", "gpu"]);

    assert_eq!(cluster.features["normal"], vec!["cpu", "ssd"]);
    assert_eq!(cluster.features["gpu"], vec!["gpu", "ssd", "fast"]);
    assert_eq!(
        cluster.features["owners"],
        vec!["cpu", "ssd", "gpu", "fast", "bigmem"]
    );
}

#[test]
fn test_sherlock_defaults() {
    let cluster = parse_config(SHERLOCK).unwrap();
    assert!(cluster.defaults.nodes.is_empty());
    assert_eq!(cluster.defaults.partitions, vec!["normal"]);
}

#[test]
fn test_reparse_is_byte_identical() {
    let first = serde_json::to_string(&parse_config(SHERLOCK).unwrap()).unwrap();
    let second = serde_json::to_string(&parse_config(SHERLOCK).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_partition_before_node_definition() {
    let text = "ClusterName=c\n\
                PartitionName=p Nodes=n[1-2]\n\
                NodeName=n[1-2] Feature=ssd\n";
    let cluster = parse_config(text).unwrap();
    assert_eq!(cluster.node("n1").unwrap().partitions, vec!["p"]);
    assert_eq!(cluster.features["p"], vec!["ssd"]);
}

#[test]
fn test_shared_partition_features() {
    let text = "ClusterName=c\n\
                NodeName=a Feature=\"ssd,fast\"\n\
                NodeName=b Feature=\"fast,gpu\"\n\
                PartitionName=p Nodes=a,b\n";
    let cluster = parse_config(text).unwrap();
    assert_eq!(cluster.features["p"], vec!["ssd", "fast", "gpu"]);
}

#[test]
fn test_zero_padded_node_names_rejected() {
    let err = parse_config("ClusterName=c\nNodeName=n[01-04]\n").unwrap_err();
    assert!(matches!(err, ParseError::MalformedExpression { line: 2, .. }));
    assert!(err.to_string().contains("zero-padded"));
}

#[test]
fn test_empty_input_has_no_cluster() {
    assert_eq!(parse_config(""), Err(ParseError::MissingClusterName));
    assert_eq!(
        parse_config("# only comments\n\n"),
        Err(ParseError::MissingClusterName)
    );
}
