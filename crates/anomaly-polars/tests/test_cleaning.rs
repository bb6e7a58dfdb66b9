//! Cleaning the content and reaction exports read from CSV

mod common;

use anomaly_polars::{clean_tables, read_csv, CleaningPlan, Error};
use common::write_temp_csv;

const CONTENT_CSV: &str = "\
Content ID,User ID,Type,Category,URL
c1,u1,photo,\"\"\"studying\"\"\",https://example.com/1
c2,u2,video,healthy eating,https://example.com/2
c3,u3,GIF,\"\"\"dogs\"\"\",
";

const REACTIONS_CSV: &str = "\
Content ID,User ID,Type,Datetime
c1,u1,love,2021-01-01 10:00:00
c1,,,2021-01-02 11:00:00
c2,u3,disgust,2021-01-03 12:00:00
c3,u4,,2021-01-04 13:00:00
";

#[test]
fn test_clean_exports_from_csv() {
    let content_path = write_temp_csv("content", CONTENT_CSV);
    let reactions_path = write_temp_csv("reactions", REACTIONS_CSV);

    let content = read_csv(&content_path).unwrap();
    let reactions = read_csv(&reactions_path).unwrap();
    std::fs::remove_file(&content_path).unwrap();
    std::fs::remove_file(&reactions_path).unwrap();

    let (content, reactions) = clean_tables(&content, &reactions).unwrap();

    assert_eq!(content.shape(), (3, 3));
    let categories: Vec<Option<&str>> = content
        .column("Category")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(categories, vec![Some("studying"), Some("healthy eating"), Some("dogs")]);
    assert!(content.column("URL").is_err());

    assert_eq!(reactions.height(), 2);
    assert!(reactions.column("Reaction Type").is_ok());
    assert!(reactions.column("User ID").is_err());
}

#[test]
fn test_reactions_plan_on_content_table_fails() {
    let path = write_temp_csv("content_only", "Content ID,Category\nc1,dogs\n");
    let df = read_csv(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let err = CleaningPlan::reactions().apply(&df).unwrap_err();
    assert!(matches!(err, Error::InvalidColumn(ref name) if name == "User ID"));
}

#[test]
fn test_missing_file() {
    assert!(matches!(read_csv("/nonexistent/content.csv"), Err(Error::Polars(_))));
}
