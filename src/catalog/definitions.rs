//! The built-in query definitions.
//!
//! Order here is presentation order. Placeholders are `?` and are bound by the
//! driver; no template ever has user input spliced into it.

use super::{QueryDefinition, QueryKind};

/// Every query the dashboard can run.
pub static QUERIES: &[QueryDefinition] = &[
    QueryDefinition {
        label: "Search Books by Title Keyword",
        template: "SELECT * FROM history_book WHERE book_title LIKE ?",
        sqlite_template: None,
        requires_param: true,
        kind: QueryKind::Search,
    },
    QueryDefinition {
        label: "1. Check Availability of eBooks vs Physical Books",
        template: "SELECT isEbook, COUNT(*) AS book_count FROM history_book GROUP BY isEbook",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(1),
    },
    QueryDefinition {
        label: "2. Find the Publisher with the Most Books Published",
        template: "SELECT publisher, COUNT(*) AS book_count \
                   FROM history_book \
                   GROUP BY publisher \
                   ORDER BY book_count DESC \
                   LIMIT 1",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(2),
    },
    QueryDefinition {
        label: "3. Identify the Publisher with the Highest Average Rating",
        template: "SELECT publisher, AVG(averagerating) AS avg_rating \
                   FROM history_book \
                   GROUP BY publisher \
                   ORDER BY avg_rating DESC \
                   LIMIT 1",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(3),
    },
    QueryDefinition {
        label: "4. Get the Top 5 Most Expensive Books by Retail Price",
        template: "SELECT book_title, amount_retailPrice \
                   FROM history_book \
                   ORDER BY amount_retailPrice DESC \
                   LIMIT 5",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(4),
    },
    QueryDefinition {
        label: "5. Find Books Published After 2010 with at Least 500 Pages",
        template: "SELECT book_title, year, pagecount \
                   FROM history_book \
                   WHERE year > 2010 AND pagecount >= 500",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(5),
    },
    QueryDefinition {
        label: "6. List Books with Discounts Greater than 20%",
        template: "SELECT book_title, amount_listPrice, amount_retailPrice, \
                   (amount_listPrice - amount_retailPrice) / amount_listPrice * 100 AS discount_percentage \
                   FROM history_book \
                   WHERE amount_listPrice > 0 \
                   AND (amount_listPrice - amount_retailPrice) / amount_listPrice > 0.2",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(6),
    },
    QueryDefinition {
        label: "7. Find the Average Page Count for eBooks vs Physical Books",
        template: "SELECT \
                   CASE WHEN isebook = 1 THEN 'eBook' ELSE 'Physical Book' END AS book_type, \
                   AVG(pagecount) AS avg_page_count \
                   FROM history_book \
                   GROUP BY isebook",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(7),
    },
    QueryDefinition {
        label: "8. Find the Top 3 Authors with the Most Books",
        template: "SELECT book_authors, COUNT(*) AS book_count \
                   FROM history_book \
                   GROUP BY book_authors \
                   ORDER BY book_count DESC \
                   LIMIT 3",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(8),
    },
    QueryDefinition {
        label: "9. List Publishers with More than 10 Books",
        template: "SELECT publisher, COUNT(*) AS book_count \
                   FROM history_book \
                   GROUP BY publisher \
                   HAVING book_count > 10",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(9),
    },
    QueryDefinition {
        label: "10. Find the Average Page Count for Each Category",
        template: "SELECT category, AVG(pagecount) AS avg_page_count \
                   FROM history_book \
                   GROUP BY category",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(10),
    },
    QueryDefinition {
        label: "11. Retrieve Books with More than 3 Authors",
        template: "SELECT book_title, book_authors \
                   FROM history_book \
                   WHERE LENGTH(book_authors) - LENGTH(REPLACE(book_authors, ',', '')) + 1 > 3",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(11),
    },
    QueryDefinition {
        label: "12. Books with Ratings Count Greater Than the Average",
        template: "SELECT book_title, ratings_count \
                   FROM history_book \
                   WHERE ratings_count > (SELECT AVG(ratings_count) FROM history_book)",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(12),
    },
    QueryDefinition {
        label: "13. Books with the Same Author Published in the Same Year",
        template: "SELECT book_title, book_authors, year \
                   FROM history_book \
                   WHERE book_authors IN ( \
                       SELECT book_authors \
                       FROM history_book \
                       GROUP BY book_authors, year \
                       HAVING COUNT(*) > 1 \
                   )",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(13),
    },
    QueryDefinition {
        label: "14. Books with a Specific Keyword in the Title",
        template: "SELECT book_title FROM history_book WHERE book_title LIKE ?",
        sqlite_template: None,
        requires_param: true,
        kind: QueryKind::Analytic(14),
    },
    QueryDefinition {
        label: "15. Year with the Highest Average Book Price",
        template: "SELECT year, AVG(amount_retailPrice) AS avg_price \
                   FROM history_book \
                   GROUP BY year \
                   ORDER BY avg_price DESC \
                   LIMIT 1",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(15),
    },
    QueryDefinition {
        label: "16. Count Authors Who Published 3 Consecutive Years",
        template: "SELECT book_authors, COUNT(DISTINCT year) AS year_count \
                   FROM history_book \
                   GROUP BY book_authors \
                   HAVING year_count >= 3",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(16),
    },
    QueryDefinition {
        label: "17. Authors Who Have Published Books in the Same Year Under Different Publishers",
        template: "SELECT book_authors, year, COUNT(DISTINCT publisher) AS publisher_count \
                   FROM history_book \
                   GROUP BY book_authors, year \
                   HAVING publisher_count > 1",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(17),
    },
    QueryDefinition {
        label: "18. Average Retail Price of eBooks vs Physical Books",
        template: "SELECT \
                   CASE WHEN isebook = 1 THEN 'eBook' ELSE 'Physical Book' END AS book_type, \
                   AVG(amount_retailPrice) AS avg_price \
                   FROM history_book \
                   GROUP BY isebook",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(18),
    },
    QueryDefinition {
        label: "19. Books with Ratings More than 2 Standard Deviations Away from Average Rating",
        template: "SELECT book_title, averagerating \
                   FROM history_book \
                   WHERE ABS(averagerating - (SELECT AVG(averagerating) FROM history_book)) > \
                   2 * (SELECT STD(averagerating) FROM history_book)",
        // SQLite has no STD(); |x - mean| > 2σ  <=>  (x - mean)² > 4·(E[x²] - mean²)
        sqlite_template: Some(
            "SELECT book_title, averagerating \
             FROM history_book, \
             (SELECT AVG(averagerating) AS mean_rating, \
                     AVG(averagerating * averagerating) AS mean_sq_rating \
              FROM history_book) AS stats \
             WHERE (averagerating - stats.mean_rating) * (averagerating - stats.mean_rating) > \
             4 * (stats.mean_sq_rating - stats.mean_rating * stats.mean_rating)",
        ),
        requires_param: false,
        kind: QueryKind::Analytic(19),
    },
    QueryDefinition {
        label: "20. Publisher with Highest Average Rating (More Than 10 Books)",
        template: "SELECT publisher, AVG(averagerating) AS avg_rating \
                   FROM history_book \
                   GROUP BY publisher \
                   HAVING COUNT(*) > 10 \
                   ORDER BY avg_rating DESC \
                   LIMIT 1",
        sqlite_template: None,
        requires_param: false,
        kind: QueryKind::Analytic(20),
    },
];
