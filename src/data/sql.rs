//! Fixed SQL text for the database workload.
//!
//! Schema, fixture rows and queries are inert constants executed verbatim.

/// Tables created by [`SCHEMA`], in dependency order
#[allow(dead_code)] // Used in tests
pub const TABLES: [&str; 5] = ["customers", "categories", "products", "orders", "order_items"];

/// Drops any leftovers from a previous run, then creates the five tables
pub const SCHEMA: &str = "
DROP TABLE IF EXISTS order_items;
DROP TABLE IF EXISTS orders;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS categories;
DROP TABLE IF EXISTS customers;

CREATE TABLE customers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    city TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    parent_id INTEGER REFERENCES categories(id)
);

CREATE TABLE products (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    price REAL NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE orders (
    id INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES customers(id),
    order_date TEXT NOT NULL,
    status TEXT NOT NULL
);

CREATE TABLE order_items (
    id INTEGER PRIMARY KEY,
    order_id INTEGER NOT NULL REFERENCES orders(id),
    product_id INTEGER NOT NULL REFERENCES products(id),
    quantity INTEGER NOT NULL,
    unit_price REAL NOT NULL
);
";

/// Fixture batches, one per table, parents before children
pub const FIXTURES: [(&str, &str); 5] = [
    (
        "customers",
        "INSERT INTO customers (id, name, email, city, created_at) VALUES
            (1, 'Alice Johnson', 'alice@example.com', 'Seattle', '2024-01-15'),
            (2, 'Bob Smith', 'bob@example.com', 'Portland', '2024-02-20'),
            (3, 'Carol White', 'carol@example.com', 'Denver', '2024-03-05');",
    ),
    (
        "categories",
        "INSERT INTO categories (id, name, parent_id) VALUES
            (1, 'Electronics', NULL),
            (2, 'Computers', 1),
            (3, 'Laptops', 2),
            (4, 'Phones', 1),
            (5, 'Home', NULL),
            (6, 'Kitchen', 5);",
    ),
    (
        "products",
        "INSERT INTO products (id, name, category_id, price, stock) VALUES
            (1, 'Laptop Pro', 3, 1299.99, 15),
            (2, 'Smartphone X', 4, 899.99, 40),
            (3, 'Desktop Tower', 2, 999.50, 8),
            (4, 'Coffee Maker', 6, 79.99, 60);",
    ),
    (
        "orders",
        "INSERT INTO orders (id, customer_id, order_date, status) VALUES
            (1, 1, '2024-04-01', 'shipped'),
            (2, 1, '2024-04-15', 'delivered'),
            (3, 2, '2024-05-02', 'pending'),
            (4, 3, '2024-05-10', 'shipped');",
    ),
    (
        "order_items",
        "INSERT INTO order_items (id, order_id, product_id, quantity, unit_price) VALUES
            (1, 1, 1, 1, 1299.99),
            (2, 1, 4, 2, 79.99),
            (3, 2, 2, 1, 899.99),
            (4, 3, 3, 1, 999.50),
            (5, 4, 4, 3, 79.99);",
    ),
];

/// Customers ranked by total spend
pub const CUSTOMER_RANKING: &str = "
SELECT c.name,
       SUM(oi.quantity * oi.unit_price) AS total_spent,
       RANK() OVER (ORDER BY SUM(oi.quantity * oi.unit_price) DESC) AS spend_rank
FROM customers c
JOIN orders o ON o.customer_id = c.id
JOIN order_items oi ON oi.order_id = o.id
GROUP BY c.id, c.name
ORDER BY spend_rank
";

/// Full category hierarchy with depth and breadcrumb path
pub const CATEGORY_TREE: &str = "
WITH RECURSIVE category_tree(id, name, parent_id, depth, path) AS (
    SELECT id, name, parent_id, 0, name
    FROM categories
    WHERE parent_id IS NULL
    UNION ALL
    SELECT c.id, c.name, c.parent_id, ct.depth + 1, ct.path || ' > ' || c.name
    FROM categories c
    JOIN category_tree ct ON c.parent_id = ct.id
)
SELECT id, name, depth, path
FROM category_tree
ORDER BY path
";

/// Per-product sales summary built from correlated subqueries
pub const PRODUCT_SALES: &str = "
SELECT p.name,
       (SELECT cat.name FROM categories cat WHERE cat.id = p.category_id) AS category,
       (SELECT COALESCE(SUM(oi.quantity), 0)
          FROM order_items oi WHERE oi.product_id = p.id) AS units_sold,
       (SELECT COALESCE(SUM(oi.quantity * oi.unit_price), 0)
          FROM order_items oi WHERE oi.product_id = p.id) AS revenue,
       (SELECT COUNT(DISTINCT o.customer_id)
          FROM orders o
          JOIN order_items oi ON oi.order_id = o.id
         WHERE oi.product_id = p.id) AS buyers
FROM products p
ORDER BY revenue DESC
";

/// Order totals with a running total per customer
pub const RUNNING_TOTALS: &str = "
SELECT c.name,
       o.id AS order_id,
       o.order_date,
       SUM(oi.quantity * oi.unit_price) AS order_total,
       SUM(SUM(oi.quantity * oi.unit_price))
           OVER (PARTITION BY c.id ORDER BY o.order_date) AS running_total
FROM orders o
JOIN customers c ON c.id = o.customer_id
JOIN order_items oi ON oi.order_id = o.id
GROUP BY c.id, c.name, o.id, o.order_date
ORDER BY c.name, o.order_date
";

/// Substring search across product and customer names
pub const PATTERN_SEARCH: &str = "
SELECT 'product' AS kind, name FROM products WHERE name LIKE '%o%'
UNION ALL
SELECT 'customer' AS kind, name FROM customers
WHERE name LIKE '%o%' OR email LIKE '%o%'
";

/// The read-only queries, in the order they are timed
pub const QUERIES: [(&str, &str); 5] = [
    ("query customer ranking", CUSTOMER_RANKING),
    ("query category tree", CATEGORY_TREE),
    ("query product sales", PRODUCT_SALES),
    ("query running totals", RUNNING_TOTALS),
    ("query pattern search", PATTERN_SEARCH),
];
