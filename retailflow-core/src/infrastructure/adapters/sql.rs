// retailflow-core/src/infrastructure/adapters/sql.rs
//
// DuckDB DDL/DML for the four relations. Constraints mirror the entity
// invariants: positive price / quantity / amount, unique email, foreign keys
// from transactions and customer_revenue. Money columns are DOUBLE: values
// are stored exactly as cleaned, never rounded or range-capped.

pub(crate) const CREATE_CUSTOMERS: &str = "
CREATE TABLE IF NOT EXISTS customers (
    customer_id BIGINT PRIMARY KEY,
    first_name VARCHAR NOT NULL,
    last_name VARCHAR NOT NULL,
    email VARCHAR UNIQUE NOT NULL,
    registration_date DATE NOT NULL
);";

pub(crate) const CREATE_PRODUCTS: &str = "
CREATE TABLE IF NOT EXISTS products (
    product_id BIGINT PRIMARY KEY,
    product_name VARCHAR NOT NULL,
    category VARCHAR,
    price DOUBLE NOT NULL CHECK (price > 0)
);";

pub(crate) const CREATE_TRANSACTIONS: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    transaction_id BIGINT PRIMARY KEY,
    customer_id BIGINT NOT NULL,
    product_id BIGINT NOT NULL,
    transaction_date DATE NOT NULL,
    quantity BIGINT NOT NULL CHECK (quantity > 0),
    amount DOUBLE NOT NULL CHECK (amount > 0),
    FOREIGN KEY (customer_id) REFERENCES customers (customer_id),
    FOREIGN KEY (product_id) REFERENCES products (product_id)
);";

pub(crate) const CREATE_CUSTOMER_REVENUE: &str = "
CREATE TABLE IF NOT EXISTS customer_revenue (
    customer_id BIGINT PRIMARY KEY,
    total_amount DOUBLE NOT NULL,
    transaction_count BIGINT NOT NULL,
    FOREIGN KEY (customer_id) REFERENCES customers (customer_id)
);";

pub(crate) const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS idx_transactions_customer_id ON transactions (customer_id);
CREATE INDEX IF NOT EXISTS idx_transactions_product_id ON transactions (product_id);
CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions (transaction_date);
CREATE INDEX IF NOT EXISTS idx_customers_email ON customers (email);
CREATE INDEX IF NOT EXISTS idx_products_category ON products (category);";

/// Child tables first: a table cannot be dropped while a foreign key points at it.
pub(crate) const DROP_ALL: &str = "
DROP TABLE IF EXISTS customer_revenue;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS customers;";

pub(crate) const DROP_CUSTOMER_REVENUE: &str = "DROP TABLE IF EXISTS customer_revenue;";

pub(crate) const INSERT_CUSTOMER: &str = "
INSERT INTO customers (customer_id, first_name, last_name, email, registration_date)
VALUES (?, ?, ?, ?, CAST(? AS DATE))";

pub(crate) const INSERT_PRODUCT: &str = "
INSERT INTO products (product_id, product_name, category, price)
VALUES (?, ?, ?, ?)";

pub(crate) const INSERT_TRANSACTION: &str = "
INSERT INTO transactions (transaction_id, customer_id, product_id, transaction_date, quantity, amount)
VALUES (?, ?, ?, CAST(? AS DATE), ?, ?)";

pub(crate) const ROLLUP_CUSTOMER_REVENUE: &str = "
INSERT INTO customer_revenue (customer_id, total_amount, transaction_count)
SELECT
    t.customer_id,
    SUM(t.amount) AS total_amount,
    COUNT(*) AS transaction_count
FROM transactions t
GROUP BY t.customer_id
ORDER BY t.customer_id";

pub(crate) const REVENUE_STATS: &str = "
SELECT
    AVG(total_amount) AS avg_revenue,
    MAX(total_amount) AS max_revenue,
    MIN(total_amount) AS min_revenue,
    SUM(total_amount) AS total_revenue
FROM customer_revenue";

pub(crate) const SELECT_CUSTOMER_REVENUE: &str = "
SELECT customer_id, total_amount, transaction_count
FROM customer_revenue
ORDER BY customer_id";

/// Full schema, in dependency order, indexes last.
pub(crate) fn schema() -> String {
    [
        CREATE_CUSTOMERS,
        CREATE_PRODUCTS,
        CREATE_TRANSACTIONS,
        CREATE_CUSTOMER_REVENUE,
        CREATE_INDEXES,
    ]
    .concat()
}
