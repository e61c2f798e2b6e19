#[cfg(test)]
mod tests {
    use indoc::indoc;
    use stencil::{
        Arg, Record, Result, SqlError, SqlerFn, Value, Valuer, and, bracket, columns, compact,
        execute, group_values, mysql, or, query, query_row, scan, scan_all, sql, sql_named,
        stringify, values,
    };
    use stencil_tests::{Executed, NullExecutor, RecordingExecutor, init_logs};

    #[derive(Record, Debug, Default, Clone, PartialEq)]
    struct Book {
        isbn: String,
        title: String,
        #[column_name("pages_count")]
        pages: u32,
        rating: Option<f64>,
    }

    /// Amount in cents, written as a decimal literal.
    #[derive(Debug)]
    struct Cents(i64);

    impl Valuer for Cents {
        fn value(&self) -> Result<Value> {
            Ok(Value::Decimal(rust_decimal::Decimal::new(self.0, 2)))
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Valuer for Broken {
        fn value(&self) -> Result<Value> {
            Err(SqlError::NonFiniteFloat.into())
        }
        fn type_name(&self) -> &'static str {
            "Broken"
        }
    }

    fn books() -> Vec<Book> {
        vec![
            Book {
                isbn: "978-0".into(),
                title: "Dune".into(),
                pages: 412,
                rating: Some(4.5),
            },
            Book {
                isbn: "978-1".into(),
                title: "Hyperion".into(),
                pages: 482,
                rating: None,
            },
        ]
    }

    #[test]
    fn search_query() {
        init_logs();
        mysql::install();
        let limit = SqlerFn::new(|_, out| {
            out.push_str("LIMIT 20");
            Ok(())
        });
        let query = sql!(
            indoc! {"
                SELECT #
                FROM #
                WHERE $
                ORDER BY # DESC
                $
            "},
            columns::<Book>(&[]),
            "library.book",
            and!(
                sql!("# >= @", "pages_count", 100),
                bracket(or!(
                    sql!("# == @", "rating", Value::Null),
                    sql!("# !== @", "title", values!["Dune", "Emma"]),
                )),
            ),
            "rating",
            Arg::sql(limit),
        );
        assert_eq!(
            compact(&stringify(&query).unwrap()),
            "SELECT `isbn`, `title`, `pages_count`, `rating` FROM `library`.`book` WHERE `pages_count` >= 100 AND (`rating` IS NULL OR `title` NOT IN ('Dune', 'Emma')) ORDER BY `rating` DESC LIMIT 20"
        );
    }

    #[test]
    fn custom_values() {
        mysql::install();
        let query = sql_named!(
            "UPDATE #t SET #c = @price WHERE #c == @old",
            "#t" => "book",
            "#c" => "price",
            "@price" => Value::custom(Cents(1999)),
            "@old" => Value::custom(Cents(5)),
        );
        assert_eq!(
            stringify(&query).unwrap(),
            "UPDATE `book` SET `price` = 19.99 WHERE `price` = 0.05"
        );

        let error = stringify(&sql!("SELECT @", Value::custom(Broken))).unwrap_err();
        let chain = error.chain().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(
            chain,
            [
                "Cannot expand placeholder `@` at index 0",
                "value Broken",
                "Broken::value() failed",
                "the dialect cannot represent a non finite float",
            ]
        );
    }

    #[tokio::test]
    async fn round_trip_through_executor() {
        init_logs();
        mysql::install();
        let rows = books()
            .iter()
            .map(|b| stencil::values(b, &[]).into_boxed_slice())
            .collect::<Vec<_>>();
        let mut conn = RecordingExecutor::new().with_rows(rows);

        let inserted = execute(
            &mut conn,
            &sql!(
                "INSERT INTO # (#) VALUES @",
                "book",
                columns::<Book>(&[]),
                group_values(&books(), &[]),
            ),
        )
        .await
        .unwrap();
        assert_eq!(inserted.rows_affected, 1);

        let fetched = query(&mut conn, &sql!("SELECT # FROM #", columns::<Book>(&[]), "book"))
            .await
            .unwrap();
        let fetched: Vec<Book> = scan_all(fetched).unwrap();
        assert_eq!(fetched, books());

        assert!(
            query_row(&mut conn, &sql!("SELECT * FROM # WHERE # == @", "book", "isbn", "978-9"))
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(
            conn.statements(),
            [
                "INSERT INTO `book` (`isbn`, `title`, `pages_count`, `rating`) VALUES ('978-0', 'Dune', 412, 4.5), ('978-1', 'Hyperion', 482, NULL)",
                "SELECT `isbn`, `title`, `pages_count`, `rating` FROM `book`",
                "SELECT * FROM `book` WHERE `isbn` = '978-9'",
            ]
        );
    }

    #[tokio::test]
    async fn rendering_failure_sends_nothing() {
        mysql::install();
        let mut conn =
            RecordingExecutor::new().with_rows([values!["978-0", "Dune", 412, 4.5].into()]);
        let error = query_row(&mut conn, &sql!("SELECT * FROM # WHERE id == @", "book"))
            .await
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<SqlError>(),
            Some(&SqlError::OutOfRange(1))
        );
        let error = execute(&mut conn, &sql!("DELETE FROM #", "bo`ok")).await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<SqlError>(),
            Some(&SqlError::DisallowedQuoteOrBracket)
        );
        assert!(conn.executed.is_empty());

        let row = query_row(&mut conn, &sql!("SELECT 1")).await.unwrap();
        let mut book = Book::default();
        scan(row.unwrap(), &mut book).unwrap();
        assert_eq!(book.pages, 412);
        assert_eq!(conn.executed, [Executed::QueryRow("SELECT 1".into())]);
    }

    #[tokio::test]
    async fn null_executor() {
        mysql::install();
        let mut conn = NullExecutor;
        let rows = query(&mut conn, &sql!("SELECT @", 1)).await.unwrap();
        assert!(rows.is_empty());
        let affected = execute(&mut conn, &sql!("DELETE FROM #", "book")).await.unwrap();
        assert_eq!(affected.rows_affected, 0);
        assert_eq!(affected.last_affected_id, None);
    }
}
