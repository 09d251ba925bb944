//! GraphQL documents sent to OpenNeuro.

pub const DATASET: &str = r#"
query dataset($datasetId: ID!) {
  dataset(id: $datasetId) {
    id
    created
    public
    draft {
      id
      modified
    }
    snapshots {
      id
      tag
      created
    }
  }
}
"#;

pub const CREATE_DATASET: &str = r#"
mutation createDataset($label: String!) {
  createDataset(label: $label) {
    id
  }
}
"#;

pub const DELETE_DATASET: &str = r#"
mutation deleteDataset($datasetId: ID!) {
  deleteDataset(id: $datasetId)
}
"#;

pub const UPDATE_FILES: &str = r#"
mutation updateFiles($datasetId: ID!, $files: FileTree!) {
  updateFiles(datasetId: $datasetId, files: $files) {
    id
  }
}
"#;

pub const DELETE_FILE: &str = r#"
mutation deleteFile($datasetId: ID!, $path: String!, $filename: String!) {
  deleteFile(datasetId: $datasetId, path: $path, filename: $filename)
}
"#;

pub const UPDATE_DESCRIPTION: &str = r#"
mutation updateDescription($datasetId: ID!, $field: String!, $value: String!) {
  updateDescription(datasetId: $datasetId, field: $field, value: $value) {
    id
  }
}
"#;

pub const CREATE_SNAPSHOT: &str = r#"
mutation createSnapshot($datasetId: ID!, $tag: String!, $changes: [String!]) {
  createSnapshot(datasetId: $datasetId, tag: $tag, changes: $changes) {
    id
    tag
    created
  }
}
"#;

pub const PUBLISH_DATASET: &str = r#"
mutation publishDataset($datasetId: ID!) {
  publishDataset(datasetId: $datasetId)
}
"#;
