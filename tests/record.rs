#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use stencil::{
        AnsiDialect, Record, SqlError, Value, columns, group_values, key_values, scan, scan_all,
        schema, sql, stringify_with, values,
    };
    use time::macros::datetime;
    use time::PrimitiveDateTime;
    use uuid::Uuid;

    #[allow(non_snake_case)]
    #[derive(Record, Debug, Default, Clone, PartialEq)]
    struct Invoice {
        id: u64,
        #[column_name("invoice_code")]
        code: Uuid,
        customerName: String,
        total: Decimal,
        paid_at: Option<PrimitiveDateTime>,
        #[ignored]
        dirty: bool,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    struct Pair {
        r#type: String,
        value: Option<i32>,
    }

    fn invoice() -> Invoice {
        Invoice {
            id: 10,
            code: Uuid::from_str("5fa1e3c2-7b0a-4d55-9c1e-0e0a8c3b9d11").unwrap(),
            customerName: "Olivia".into(),
            total: Decimal::from_str("99.90").unwrap(),
            paid_at: Some(datetime!(2025-01-31 17:45:00)),
            dirty: true,
        }
    }

    #[test]
    fn derived_columns() {
        assert_eq!(
            columns::<Invoice>(&[]),
            ["id", "invoice_code", "customer_name", "total", "paid_at"]
        );
        assert_eq!(
            columns::<Invoice>(&["total", "id"]),
            ["invoice_code", "customer_name", "paid_at"]
        );
        assert_eq!(columns::<Pair>(&[]), ["type", "value"]);
        assert_eq!(schema::<Invoice>().len(), 5);
    }

    #[test]
    fn derived_values() {
        let invoice = invoice();
        assert!(invoice.dirty);
        assert_eq!(
            stencil::values(&invoice, &["invoice_code", "total"]),
            values![10u64, "Olivia", datetime!(2025-01-31 17:45:00)]
        );
        let pairs = [
            Pair {
                r#type: "a".into(),
                value: Some(1),
            },
            Pair {
                r#type: "b".into(),
                value: None,
            },
        ];
        assert_eq!(
            group_values(&pairs, &[]),
            vec![values!["a", 1], values!["b", Value::Null]]
        );
        let kv = key_values(&pairs[1], &["type"]);
        assert_eq!(kv.len(), 1);
        assert_eq!(kv[0].to_string(), "value = NULL");
    }

    #[test]
    fn insert_and_update() {
        let dialect = AnsiDialect::new();
        let invoice = invoice();
        let insert = sql!(
            "INSERT INTO # (#) VALUES @",
            "billing.invoice",
            columns::<Invoice>(&["paid_at"]),
            group_values(&[invoice.clone()], &["paid_at"]),
        );
        assert_eq!(
            stringify_with(&dialect, &insert).unwrap(),
            r#"INSERT INTO "billing"."invoice" ("id", "invoice_code", "customer_name", "total") VALUES (10, '5fa1e3c2-7b0a-4d55-9c1e-0e0a8c3b9d11', 'Olivia', 99.90)"#
        );
        let update = sql!(
            "UPDATE # SET @ WHERE # == @",
            "billing.invoice",
            key_values(&invoice, &["id", "invoice_code", "customer_name"]),
            "id",
            invoice.id,
        );
        assert_eq!(
            stringify_with(&dialect, &update).unwrap(),
            r#"UPDATE "billing"."invoice" SET "total" = 99.90, "paid_at" = '2025-01-31 17:45:00' WHERE "id" = 10"#
        );
    }

    #[test]
    fn scan_derived() {
        let expected = invoice();
        let mut scanned = Invoice::default();
        scan(
            values![
                10,
                "5fa1e3c2-7b0a-4d55-9c1e-0e0a8c3b9d11",
                "Olivia",
                Decimal::from_str("99.90").unwrap(),
                datetime!(2025-01-31 17:45:00),
            ],
            &mut scanned,
        )
        .unwrap();
        assert_eq!(scanned, Invoice { dirty: false, ..expected });

        let pairs: Vec<Pair> =
            scan_all([values!["x", 5], values!["y", Value::Null, "extra"]]).unwrap();
        assert_eq!(
            pairs,
            [
                Pair {
                    r#type: "x".into(),
                    value: Some(5),
                },
                Pair {
                    r#type: "y".into(),
                    value: None,
                },
            ]
        );
    }

    #[test]
    fn scan_errors() {
        let mut pair = Pair::default();
        let error = scan(values!["x", "five"], &mut pair).unwrap_err();
        assert_eq!(format!("{error}"), "Cannot scan column `value`");
        assert!(matches!(
            error.downcast_ref::<SqlError>(),
            Some(SqlError::ValueConversion { .. })
        ));
        assert_eq!(pair.r#type, "x");

        let mut invoice = Invoice::default();
        let error = scan(values![1, Value::Null, "a", 1, Value::Null], &mut invoice).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SqlError>(),
            Some(SqlError::NotNullable(..))
        ));

        let error = scan(values!["x"], &mut pair).unwrap_err();
        assert_eq!(
            error.downcast_ref::<SqlError>(),
            Some(&SqlError::OutOfRange(1))
        );
    }
}
