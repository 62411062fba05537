//! Global CSS styles for Registrar.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --surface: #0f1115;
  --surface-raised: #171a21;
  --border: #262a33;

  --accent: #00d4aa;
  --accent-glow: rgba(0, 212, 170, 0.25);

  --text-primary: #f5f5f5;
  --text-secondary: rgba(245, 245, 245, 0.7);
  --text-muted: rgba(245, 245, 245, 0.5);

  --danger: #ff3366;
  --warning: #ff9f00;

  --font-sans: 'Inter', 'Segoe UI', system-ui, sans-serif;
  --font-mono: 'JetBrains Mono', 'SF Mono', 'Consolas', monospace;

  --text-xs: 0.75rem;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.25rem;

  --transition-fast: 150ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  background: var(--surface);
  color: var(--text-primary);
  font-family: var(--font-sans);
  font-size: var(--text-base);
}

/* === Layout === */
.shell {
  display: flex;
  flex-direction: column;
  height: 100vh;
}

.shell-body {
  display: flex;
  flex: 1;
  min-height: 0;
}

.page {
  flex: 1;
  overflow-y: auto;
  padding: 1.5rem 2rem;
}

.page-title {
  font-size: var(--text-lg);
  margin-bottom: 1rem;
}

.fatal {
  padding: 3rem;
}

/* === Navigation === */
.nav-header {
  display: flex;
  align-items: center;
  gap: 2rem;
  padding: 0.75rem 2rem;
  background: var(--surface-raised);
  border-bottom: 1px solid var(--border);
}

.nav-title {
  font-weight: 600;
  color: var(--accent);
}

.nav-links {
  display: flex;
  gap: 1rem;
  flex: 1;
}

.nav-link {
  color: var(--text-secondary);
  text-decoration: none;
  font-size: var(--text-sm);
  transition: color var(--transition-fast);
}

.nav-link:hover,
.nav-link.active {
  color: var(--text-primary);
}

.debug-toggle {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  background: transparent;
  border: 1px solid var(--border);
  color: var(--text-secondary);
  padding: 0.35rem 0.75rem;
  border-radius: 4px;
  font-family: var(--font-mono);
  font-size: var(--text-xs);
  cursor: pointer;
}

.debug-toggle.active {
  border-color: var(--accent);
  color: var(--accent);
  box-shadow: 0 0 8px var(--accent-glow);
}

.debug-count {
  background: var(--border);
  border-radius: 8px;
  padding: 0 0.4rem;
}

/* === Buttons & Forms === */
.btn {
  background: var(--accent);
  color: var(--surface);
  border: none;
  border-radius: 4px;
  padding: 0.4rem 0.9rem;
  font-size: var(--text-sm);
  cursor: pointer;
}

.btn-secondary {
  background: transparent;
  color: var(--text-secondary);
  border: 1px solid var(--border);
}

.btn-danger {
  background: transparent;
  color: var(--danger);
  border: 1px solid var(--danger);
}

.btn-small {
  padding: 0.2rem 0.6rem;
  font-size: var(--text-xs);
}

.btn-icon {
  background: transparent;
  color: var(--text-muted);
  padding: 0.2rem 0.4rem;
}

.record-form {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
  margin-bottom: 1.5rem;
  align-items: flex-end;
}

.record-form input,
.record-form select,
.search-input {
  background: var(--surface-raised);
  color: var(--text-primary);
  border: 1px solid var(--border);
  border-radius: 4px;
  padding: 0.4rem 0.6rem;
  font-size: var(--text-sm);
}

.search-input {
  width: 100%;
  max-width: 24rem;
  margin-bottom: 1rem;
}

.field {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
}

.field-label {
  color: var(--text-muted);
  font-size: var(--text-xs);
}

.field input {
  background: var(--surface-raised);
  color: var(--text-primary);
  border: 1px solid var(--border);
  border-radius: 4px;
  padding: 0.4rem 0.6rem;
  font-size: var(--text-sm);
}

.error-banner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  border: 1px solid var(--danger);
  color: var(--danger);
  border-radius: 4px;
  padding: 0.5rem 0.75rem;
  margin-bottom: 1rem;
  font-size: var(--text-sm);
}

/* === Tables === */
.record-table {
  width: 100%;
  border-collapse: collapse;
  font-size: var(--text-sm);
}

.record-table th {
  text-align: left;
  color: var(--text-muted);
  font-weight: 500;
  border-bottom: 1px solid var(--border);
  padding: 0.5rem;
}

.record-table td {
  border-bottom: 1px solid var(--border);
  padding: 0.5rem;
}

.record-table .actions {
  display: flex;
  gap: 0.4rem;
  justify-content: flex-end;
}

.empty-state {
  color: var(--text-muted);
  padding: 2rem 0;
}

/* === SQL Debugger === */
.sql-panel {
  width: 28rem;
  display: flex;
  flex-direction: column;
  background: var(--surface-raised);
  border-left: 1px solid var(--border);
}

.sql-panel-header {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  padding: 0.75rem 1rem;
  border-bottom: 1px solid var(--border);
}

.sql-panel-title {
  font-size: var(--text-base);
  flex: 1;
}

.sql-panel-count {
  color: var(--text-muted);
  font-size: var(--text-xs);
}

.sql-panel-entries {
  flex: 1;
  overflow-y: auto;
  padding: 0.5rem 1rem;
}

.sql-panel-empty {
  color: var(--text-muted);
  font-size: var(--text-sm);
  padding: 2rem 0;
  text-align: center;
}

.sql-row {
  border-bottom: 1px solid var(--border);
  padding: 0.6rem 0;
}

.sql-row-meta {
  display: flex;
  gap: 0.75rem;
  align-items: center;
  font-family: var(--font-mono);
  font-size: var(--text-xs);
  color: var(--text-muted);
}

.op-badge {
  border: 1px solid;
  border-radius: 3px;
  padding: 0 0.35rem;
  font-weight: 600;
}

.sql-text,
.sql-params {
  font-family: var(--font-mono);
  font-size: var(--text-xs);
  white-space: pre-wrap;
  word-break: break-word;
  margin-top: 0.35rem;
}

.sql-params {
  color: var(--text-secondary);
}

/* === Dashboard === */
.stat-cards {
  display: grid;
  grid-template-columns: repeat(4, 1fr);
  gap: 1rem;
  margin-bottom: 2rem;
}

.stat-card {
  background: var(--surface-raised);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 1rem;
}

.stat-value {
  font-size: 1.75rem;
  font-weight: 600;
}

.stat-label {
  color: var(--text-muted);
  font-size: var(--text-xs);
}

.charts {
  display: grid;
  grid-template-columns: repeat(2, 1fr);
  gap: 1.5rem;
}

.chart {
  background: var(--surface-raised);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 1rem;
}

.chart-title {
  font-size: var(--text-sm);
  margin-bottom: 0.75rem;
}

.chart-row {
  display: grid;
  grid-template-columns: 9rem 1fr 2rem;
  gap: 0.5rem;
  align-items: center;
  font-size: var(--text-xs);
  margin-bottom: 0.35rem;
}

.chart-bar {
  height: 0.75rem;
  border-radius: 2px;
}

.chart-value {
  text-align: right;
  color: var(--text-secondary);
}
"#;
