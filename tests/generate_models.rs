use std::{collections::HashMap, fs};

use async_trait::async_trait;
use tempfile::TempDir;

use modelgen::{
    codegen::{ColumnDescriptor, GenOptions, ModelAssembler, TableColumns},
    db::ColumnSource,
    error::{GenError, GenResult},
    generator::Generator,
    render::{ModelWriter, Passthrough, SourceFormatter},
};

#[derive(Default)]
struct FakeSource {
    tables: HashMap<String, TableColumns>,
}

impl FakeSource {
    fn with_table(mut self, name: &str, columns: Vec<ColumnDescriptor>) -> Self {
        let columns = columns
            .into_iter()
            .map(|column| (column.name.clone(), column))
            .collect();
        self.tables.insert(name.to_string(), columns);
        self
    }
}

#[async_trait]
impl ColumnSource for FakeSource {
    async fn table_names(&self) -> GenResult<Vec<String>> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn columns(&self, table: &str) -> GenResult<TableColumns> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| GenError::NoColumns {
                table: table.to_string(),
            })
    }
}

struct RejectTable(&'static str);

impl SourceFormatter for RejectTable {
    fn format(&self, table: &str, source: String) -> GenResult<String> {
        if table == self.0 {
            return Err(GenError::Format {
                table: table.to_string(),
                message: "syntax error".to_string(),
            });
        }
        Ok(source)
    }
}

fn shop() -> FakeSource {
    FakeSource::default()
        .with_table(
            "order_items",
            vec![
                ColumnDescriptor::new("id", "int", 1)
                    .with_raw_type("int(11)")
                    .primary_key()
                    .with_extra("auto_increment"),
                ColumnDescriptor::new("sku", "varchar", 2).with_raw_type("varchar(64)"),
                ColumnDescriptor::new("state", "enum", 3).with_raw_type("enum('OPEN','SHIPPED')"),
            ],
        )
        .with_table(
            "tags",
            vec![ColumnDescriptor::new("name", "varchar", 1).with_raw_type("varchar(32)")],
        )
}

fn generator(
    source: FakeSource,
    dir: &TempDir,
    formatter: Box<dyn SourceFormatter>,
) -> Generator<FakeSource> {
    Generator::new(
        source,
        ModelAssembler::new(Default::default(), GenOptions::default()),
        formatter,
        ModelWriter::new(dir.path().join("model")),
        "model",
    )
}

#[tokio::test]
async fn generates_every_table_when_none_are_listed() {
    let tmp = TempDir::new().expect("create temp dir");
    let generator = generator(shop(), &tmp, Box::new(Passthrough));

    let report = generator.run(&[]).await.expect("run should succeed");

    assert!(report.is_success());
    assert_eq!(
        report.written,
        vec![
            tmp.path().join("model/order_items.go"),
            tmp.path().join("model/tags.go"),
        ]
    );

    let order_items =
        fs::read_to_string(tmp.path().join("model/order_items.go")).expect("read model");
    assert!(order_items.starts_with("package model\n"));
    assert!(order_items.contains("type State int\n"));
    assert!(order_items.contains("\tOPEN_order_items State = iota\n"));
    assert!(order_items.contains("type OrderItems struct {\n\tID "));
    assert!(order_items.contains("\tSku string `json:\"sku\"`\n"));
    assert!(order_items.contains("\tState State `json:\"state\"`\n}"));
    assert!(order_items.contains("func (o *OrderItems) TableName() string {\n\treturn \"order_items\"\n}"));
}

#[tokio::test]
async fn one_failing_table_does_not_stop_the_others() {
    let tmp = TempDir::new().expect("create temp dir");
    let generator = generator(shop(), &tmp, Box::new(RejectTable("order_items")));
    let tables = vec![
        "order_items".to_string(),
        "missing".to_string(),
        "tags".to_string(),
    ];

    let report = generator.run(&tables).await.expect("run should succeed");

    assert!(!report.is_success());
    assert_eq!(report.written, vec![tmp.path().join("model/tags.go")]);

    let failed: Vec<&str> = report
        .failures
        .iter()
        .map(|(table, _)| table.as_str())
        .collect();
    assert_eq!(failed, vec!["order_items", "missing"]);
    assert!(matches!(report.failures[0].1, GenError::Format { .. }));
    assert!(matches!(report.failures[1].1, GenError::NoColumns { .. }));
    assert!(!tmp.path().join("model/order_items.go").exists());
}
