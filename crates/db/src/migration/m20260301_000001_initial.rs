//! Initial database migration.
//!
//! Creates enums, tables, indexes and the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: OPERATORS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: CLIENTS & CATALOG
        // ============================================================
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;

        // ============================================================
        // PART 4: BUDGETS
        // ============================================================
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(BUDGET_ITEMS_SQL).await?;

        // ============================================================
        // PART 5: PEOPLE & COSTS
        // ============================================================
        db.execute_unprepared(EMPLOYEES_SQL).await?;
        db.execute_unprepared(COSTS_SQL).await?;

        // ============================================================
        // PART 6: RECEIVABLES
        // ============================================================
        db.execute_unprepared(BOLETOS_SQL).await?;

        // ============================================================
        // PART 7: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE product_category AS ENUM ('material', 'service', 'equipment', 'other');

CREATE TYPE budget_status AS ENUM ('draft', 'sent', 'approved', 'rejected');

CREATE TYPE cost_category AS ENUM (
    'rent',
    'utilities',
    'payroll',
    'material',
    'transport',
    'marketing',
    'taxes',
    'maintenance',
    'services',
    'other'
);

CREATE TYPE parcela_status AS ENUM ('pendente', 'pago', 'vencido', 'cancelado');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id              UUID PRIMARY KEY,
    email           VARCHAR(255) NOT NULL UNIQUE,
    password_hash   VARCHAR(255) NOT NULL,
    full_name       VARCHAR(255) NOT NULL,
    is_active       BOOLEAN NOT NULL DEFAULT TRUE,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id              UUID PRIMARY KEY,
    name            VARCHAR(255) NOT NULL,
    email           VARCHAR(255),
    phone           VARCHAR(50),
    document        VARCHAR(20),
    address         TEXT,
    budget_ids      JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_clients_name ON clients (LOWER(name));
CREATE INDEX idx_clients_document ON clients (document);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id              UUID PRIMARY KEY,
    name            VARCHAR(255) NOT NULL,
    description     TEXT,
    category        product_category NOT NULL,
    sale_price      NUMERIC(14, 2) NOT NULL CHECK (sale_price >= 0),
    cost_price      NUMERIC(14, 2) NOT NULL CHECK (cost_price >= 0),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_products_category ON products (category);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id              UUID PRIMARY KEY,
    client_id       UUID NOT NULL REFERENCES clients(id),
    title           VARCHAR(255) NOT NULL,
    status          budget_status NOT NULL DEFAULT 'draft',
    subtotal        NUMERIC(14, 2) NOT NULL CHECK (subtotal >= 0),
    discount        NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (discount >= 0),
    shipping        NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (shipping >= 0),
    tax             NUMERIC(14, 2) NOT NULL DEFAULT 0 CHECK (tax >= 0),
    total_amount    NUMERIC(14, 2) NOT NULL CHECK (total_amount >= 0),
    material_cost   NUMERIC(14, 2) NOT NULL CHECK (material_cost >= 0),
    valid_until     DATE,
    notes           TEXT,
    approved_at     TIMESTAMPTZ,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_budgets_client ON budgets (client_id);
CREATE INDEX idx_budgets_status ON budgets (status);
";

const BUDGET_ITEMS_SQL: &str = r"
CREATE TABLE budget_items (
    id              UUID PRIMARY KEY,
    budget_id       UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    position        INTEGER NOT NULL CHECK (position >= 0),
    product_id      UUID NOT NULL,
    product_name    VARCHAR(255) NOT NULL,
    quantity        NUMERIC(12, 3) NOT NULL CHECK (quantity > 0),
    unit_price      NUMERIC(14, 2) NOT NULL CHECK (unit_price >= 0),
    unit_cost       NUMERIC(14, 2) NOT NULL CHECK (unit_cost >= 0),
    total_price     NUMERIC(14, 2) NOT NULL CHECK (total_price >= 0),

    UNIQUE (budget_id, position)
);
";

const EMPLOYEES_SQL: &str = r"
CREATE TABLE employees (
    id                  UUID PRIMARY KEY,
    name                VARCHAR(255) NOT NULL,
    position            VARCHAR(255) NOT NULL,
    salary              NUMERIC(14, 2) NOT NULL CHECK (salary >= 0),
    admission_date      DATE NOT NULL,
    meal_voucher        BOOLEAN NOT NULL DEFAULT FALSE,
    transport_voucher   BOOLEAN NOT NULL DEFAULT FALSE,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const COSTS_SQL: &str = r"
CREATE TABLE fixed_costs (
    id              UUID PRIMARY KEY,
    description     VARCHAR(255) NOT NULL,
    category        cost_category NOT NULL,
    amount          NUMERIC(14, 2) NOT NULL CHECK (amount >= 0),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE variable_costs (
    id              UUID PRIMARY KEY,
    description     VARCHAR(255) NOT NULL,
    category        cost_category NOT NULL,
    amount          NUMERIC(14, 2) NOT NULL CHECK (amount >= 0),
    date            DATE NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_variable_costs_date ON variable_costs (date);
";

const BOLETOS_SQL: &str = r"
CREATE TABLE boletos (
    id                  UUID PRIMARY KEY,
    client_id           UUID NOT NULL REFERENCES clients(id),
    description         VARCHAR(255) NOT NULL,
    total_amount        NUMERIC(14, 2) NOT NULL CHECK (total_amount > 0),
    installment_count   INTEGER NOT NULL CHECK (installment_count BETWEEN 1 AND 36),
    first_due_date      DATE NOT NULL,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_boletos_client ON boletos (client_id);

CREATE TABLE boleto_parcelas (
    id              UUID PRIMARY KEY,
    boleto_id       UUID NOT NULL REFERENCES boletos(id) ON DELETE CASCADE,
    number          INTEGER NOT NULL CHECK (number >= 1),
    value           NUMERIC(14, 2) NOT NULL CHECK (value >= 0),
    due_date        DATE NOT NULL,
    status          parcela_status NOT NULL DEFAULT 'pendente',
    payment_date    DATE,

    UNIQUE (boleto_id, number),
    CONSTRAINT chk_payment_date_only_when_paid
        CHECK (payment_date IS NULL OR status = 'pago')
);

CREATE INDEX idx_boleto_parcelas_due ON boleto_parcelas (due_date) WHERE status = 'pendente';
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_clients_updated_at BEFORE UPDATE ON clients
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_products_updated_at BEFORE UPDATE ON products
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_budgets_updated_at BEFORE UPDATE ON budgets
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_employees_updated_at BEFORE UPDATE ON employees
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_fixed_costs_updated_at BEFORE UPDATE ON fixed_costs
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_variable_costs_updated_at BEFORE UPDATE ON variable_costs
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_boletos_updated_at BEFORE UPDATE ON boletos
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS boleto_parcelas;
DROP TABLE IF EXISTS boletos;
DROP TABLE IF EXISTS variable_costs;
DROP TABLE IF EXISTS fixed_costs;
DROP TABLE IF EXISTS employees;
DROP TABLE IF EXISTS budget_items;
DROP TABLE IF EXISTS budgets;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS clients;
DROP TABLE IF EXISTS users;

DROP FUNCTION IF EXISTS set_updated_at();

DROP TYPE IF EXISTS parcela_status;
DROP TYPE IF EXISTS cost_category;
DROP TYPE IF EXISTS budget_status;
DROP TYPE IF EXISTS product_category;
";
