#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use stencil_core::{
        AnsiDialect, AsValue, Column, Kv, Record, Result, Row, SqlError, Value, columns,
        group_values, key_values, scan, scan_all, schema, sql, stringify_with, values,
    };

    #[derive(Default, Debug, Clone, PartialEq)]
    struct Person {
        id: i64,
        family_name: String,
        given_name: String,
        age: Option<u8>,
    }

    impl Record for Person {
        fn columns() -> Vec<Column<Self>> {
            vec![
                Column::new(
                    "id",
                    |r: &Self| r.id.as_value(),
                    |r: &mut Self, v: Value| -> Result<()> {
                        r.id = AsValue::try_from_value(v)?;
                        Ok(())
                    },
                ),
                Column::new(
                    "family_name",
                    |r: &Self| r.family_name.clone().as_value(),
                    |r: &mut Self, v: Value| -> Result<()> {
                        r.family_name = AsValue::try_from_value(v)?;
                        Ok(())
                    },
                ),
                Column::new(
                    "given_name",
                    |r: &Self| r.given_name.clone().as_value(),
                    |r: &mut Self, v: Value| -> Result<()> {
                        r.given_name = AsValue::try_from_value(v)?;
                        Ok(())
                    },
                ),
                Column::new(
                    "age",
                    |r: &Self| r.age.as_value(),
                    |r: &mut Self, v: Value| -> Result<()> {
                        r.age = AsValue::try_from_value(v)?;
                        Ok(())
                    },
                ),
            ]
        }
    }

    fn olivia() -> Person {
        Person {
            id: 1,
            family_name: "Williams".into(),
            given_name: "Olivia".into(),
            age: Some(54),
        }
    }

    fn kenny() -> Person {
        Person {
            id: 2,
            family_name: "McCormick".into(),
            given_name: "Kenny".into(),
            age: None,
        }
    }

    #[test]
    fn schema_is_cached() {
        let a = schema::<Person>();
        let b = schema::<Person>();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 4);
        assert_eq!(a[3].name, "age");
    }

    #[test]
    fn column_names() {
        assert_eq!(
            columns::<Person>(&[]),
            ["id", "family_name", "given_name", "age"]
        );
        assert_eq!(
            columns::<Person>(&["id", "age"]),
            ["family_name", "given_name"]
        );
        assert_eq!(columns::<Person>(&["unknown"]).len(), 4);
    }

    #[test]
    fn record_values() {
        assert_eq!(
            stencil_core::values(&olivia(), &["id"]),
            values!["Williams", "Olivia", 54u8]
        );
        assert_eq!(
            stencil_core::values(&kenny(), &[]),
            values![2i64, "McCormick", "Kenny", Value::Null]
        );
        assert_eq!(
            group_values(&[olivia(), kenny()], &["id", "family_name"]),
            vec![values!["Olivia", 54u8], values!["Kenny", Value::Null]]
        );
        assert_eq!(
            key_values(&kenny(), &["id", "given_name"]),
            vec![Kv::new("family_name", "McCormick"), Kv::new("age", Value::Null)]
        );
    }

    #[test]
    fn insert_and_update() {
        let dialect = AnsiDialect::new();
        let insert = sql!(
            "INSERT INTO person (#) VALUES (@)",
            columns::<Person>(&["id"]),
            stencil_core::values(&olivia(), &["id"]),
        );
        assert_eq!(
            stringify_with(&dialect, &insert).unwrap(),
            r#"INSERT INTO person ("family_name", "given_name", "age") VALUES ('Williams', 'Olivia', 54)"#
        );

        let bulk = sql!(
            "INSERT INTO person (#) VALUES @",
            columns::<Person>(&[]),
            group_values(&[olivia(), kenny()], &[]),
        );
        assert_eq!(
            stringify_with(&dialect, &bulk).unwrap(),
            r#"INSERT INTO person ("id", "family_name", "given_name", "age") VALUES (1, 'Williams', 'Olivia', 54), (2, 'McCormick', 'Kenny', NULL)"#
        );

        let update = sql!(
            "UPDATE person SET @ WHERE id = @",
            key_values(&kenny(), &["id"]),
            kenny().id,
        );
        assert_eq!(
            stringify_with(&dialect, &update).unwrap(),
            r#"UPDATE person SET "family_name" = 'McCormick', "given_name" = 'Kenny', "age" = NULL WHERE id = 2"#
        );
    }

    #[test]
    fn scan_row() {
        let mut person = Person::default();
        scan(values![1, "Williams", "Olivia", 54], &mut person).unwrap();
        assert_eq!(person, olivia());

        let row: Row = values![2, "McCormick", "Kenny", Value::Null, "extra"].into();
        scan(row, &mut person).unwrap();
        assert_eq!(person, kenny());
    }

    #[test]
    fn scan_errors() {
        let mut person = Person::default();
        let error = scan(values![1, "Williams"], &mut person).unwrap_err();
        assert_eq!(
            error.downcast_ref::<SqlError>(),
            Some(&SqlError::OutOfRange(2))
        );
        assert_eq!(person, Person::default());

        let error = scan(values![1, "Williams", "Olivia", 300], &mut person).unwrap_err();
        assert_eq!(format!("{error}"), "Cannot scan column `age`");
        assert!(matches!(
            error.downcast_ref::<SqlError>(),
            Some(SqlError::ValueConversion { .. })
        ));

        let error = scan(values![Value::Null, "a", "b", 1], &mut person).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SqlError>(),
            Some(SqlError::NotNullable(..))
        ));
    }

    #[test]
    fn scan_many() {
        let rows = vec![
            values![1, "Williams", "Olivia", 54],
            values![2, "McCormick", "Kenny", Value::Null],
        ];
        let people: Vec<Person> = scan_all(rows).unwrap();
        assert_eq!(people, [olivia(), kenny()]);
    }
}
