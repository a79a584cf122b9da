use crate::models::BoardView;

pub fn render_index(view: &BoardView) -> String {
    let items: String = view
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<li class="habit-item{negative}" data-habit-id="{id}">
        <label><input type="checkbox" class="habit-checkbox" data-habit-id="{id}"{checked} /> <span class="habit-name">{name}</span></label>
        <span class="habit-streak" data-habit-id="{id}">{streak}</span>
      </li>"#,
                id = item.id,
                name = escape_html(&item.name),
                streak = escape_html(&item.streak),
                checked = if item.checked { " checked" } else { "" },
                negative = if item.is_default_made { " negative" } else { "" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    INDEX_HTML
        .replace("{{DONE}}", &view.checked_count.to_string())
        .replace("{{TOTAL}}", &view.total.to_string())
        .replace("{{ITEMS}}", &items)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Board</title>
  <style>
    :root {
      --ink: #2b2a28;
      --muted: #6c757d;
      --card: #ffffff;
      --good: #28a745;
      --bad: #dc3545;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: #f6f4ef;
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 20px;
      padding: 32px;
      display: grid;
      gap: 24px;
      box-shadow: 0 20px 50px rgba(0, 0, 0, 0.08);
    }

    h1, h2 {
      margin: 0;
    }

    .habits-list {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .habit-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 12px 16px;
      border-radius: 12px;
      border: 1px solid rgba(0, 0, 0, 0.08);
    }

    .habit-item.negative .habit-name {
      color: var(--bad);
    }

    .habit-streak {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .kpi-form {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    #chart {
      width: 100%;
      height: 220px;
    }

    .trend-badge.positive {
      color: var(--good);
    }

    .trend-badge.negative {
      color: var(--bad);
    }

    .trend-badge.neutral {
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Today</h1>
      <p id="progress"><span id="done">{{DONE}}</span> of <span id="total">{{TOTAL}}</span> done</p>
    </header>

    <ul class="habits-list">
      {{ITEMS}}
    </ul>

    <section>
      <h2>KPI trend</h2>
      <form class="kpi-form" id="kpi-form">
        <input id="kpi-name" placeholder="KPI name" required />
        <select id="kpi-period">
          <option value="weekly">Weekly</option>
          <option value="monthly">Monthly</option>
        </select>
        <button type="submit">Load</button>
      </form>
      <svg id="chart" viewBox="0 0 600 220" role="img" aria-label="KPI chart"></svg>
      <p>Latest <span id="kpi-latest">-</span> &middot; EMA <span id="kpi-ema">-</span> &middot; <span id="kpi-trend" class="trend-badge neutral">No trend</span></p>
    </section>
  </main>

  <script>
    const list = document.querySelector('.habits-list');

    const escapeHtml = (raw) => String(raw).replace(/[&<>"']/g, (ch) => `&#${ch.charCodeAt(0)};`);

    const renderBoard = (board) => {
      document.getElementById('done').textContent = board.checked_count;
      document.getElementById('total').textContent = board.total;
      list.innerHTML = board.items.map((item) => `
        <li class="habit-item${item.is_default_made ? ' negative' : ''}" data-habit-id="${item.id}">
          <label><input type="checkbox" class="habit-checkbox" data-habit-id="${item.id}"${item.checked ? ' checked' : ''} /> <span class="habit-name">${escapeHtml(item.name)}</span></label>
          <span class="habit-streak" data-habit-id="${item.id}">${escapeHtml(item.streak)}</span>
        </li>`).join('');
    };

    list.addEventListener('change', async (event) => {
      const box = event.target;
      if (!box.classList.contains('habit-checkbox')) {
        return;
      }
      const res = await fetch(`/api/habits/${box.dataset.habitId}/toggle`, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ checked: box.checked })
      });
      if (!res.ok) {
        box.checked = !box.checked;
        alert(await res.text());
        return;
      }
      renderBoard(await res.json());
    });

    const renderChart = (chart) => {
      const svg = document.getElementById('chart');
      const values = chart.values.map((v) => (typeof v === 'number' ? v : null));
      const present = values.filter((v) => v !== null);
      if (!present.length) {
        svg.innerHTML = '<text x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }
      let min = Math.min(...present);
      let max = Math.max(...present);
      if (min === max) {
        min -= 1;
        max += 1;
      }
      const step = values.length > 1 ? 560 / (values.length - 1) : 0;
      const x = (i) => 20 + i * step;
      const y = (v) => 200 - ((v - min) / (max - min)) * 180;
      let lines = '';
      for (let i = 1; i < values.length; i += 1) {
        if (values[i - 1] === null || values[i] === null) {
          continue;
        }
        lines += `<line x1="${x(i - 1)}" y1="${y(values[i - 1])}" x2="${x(i)}" y2="${y(values[i])}" stroke="${chart.segment_colors[i - 1]}" stroke-width="3" />`;
      }
      const dots = values
        .map((v, i) => (v === null ? '' : `<circle cx="${x(i)}" cy="${y(v)}" r="4" fill="${chart.point_colors[i]}"><title>${escapeHtml(chart.labels[i])}: ${escapeHtml(chart.tooltips[i])}</title></circle>`))
        .join('');
      svg.innerHTML = lines + dots;
    };

    document.getElementById('kpi-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const name = document.getElementById('kpi-name').value;
      const period = document.getElementById('kpi-period').value;
      const res = await fetch(`/api/kpis/${encodeURIComponent(name)}/chart?period=${period}`);
      if (!res.ok) {
        alert(await res.text());
        return;
      }
      const chart = await res.json();
      renderChart(chart);
      const summary = chart.summary || { latest: '-', ema: '-', trend: 'No trend', class: 'neutral' };
      document.getElementById('kpi-latest').textContent = summary.latest;
      document.getElementById('kpi-ema').textContent = summary.ema;
      const badge = document.getElementById('kpi-trend');
      badge.textContent = summary.trend;
      badge.className = `trend-badge ${summary.class}`;
    });

    fetch('/api/habits/streaks', { method: 'POST' })
      .then((res) => (res.ok ? res.json() : null))
      .then((board) => board && renderBoard(board))
      .catch(() => {});
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoardItemView;

    #[test]
    fn renders_items_in_board_order_with_escaped_names() {
        let view = BoardView {
            total: 2,
            checked_count: 1,
            items: vec![
                BoardItemView {
                    id: 4,
                    name: "Read <b>".to_string(),
                    checked: false,
                    is_default_made: false,
                    position: 0,
                    streak: "2 day streak".to_string(),
                },
                BoardItemView {
                    id: 9,
                    name: "No sugar".to_string(),
                    checked: true,
                    is_default_made: true,
                    position: 1,
                    streak: "6 day streak".to_string(),
                },
            ],
        };

        let html = render_index(&view);
        assert!(html.contains("Read &lt;b&gt;"));
        assert!(html.contains(r#"<span id="done">1</span>"#));
        assert!(html.contains(r#"data-habit-id="9" checked"#));
        assert!(html.contains(r#"class="habit-item negative""#));
        let first = html.find(r#"data-habit-id="4""#).unwrap();
        let second = html.find(r#"data-habit-id="9""#).unwrap();
        assert!(first < second);
    }
}
