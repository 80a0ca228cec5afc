use crate::fetch::SOURCE_LINK_URL;

pub fn render_index() -> String {
    INDEX_HTML.replace("{{DATA_LINK_URL}}", SOURCE_LINK_URL)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>C19 Canada</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f4f6f8;
      --bg-2: #d9e4ec;
      --ink: #22303b;
      --accent: #c2504a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e8eef3 60%, #f3f6f8 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .source-line {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      gap: 10px;
      font-size: 0.95rem;
    }

    .source-line a {
      color: var(--accent-2);
    }

    #last-fetched {
      margin: 0;
      color: #5f6a72;
    }

    .filters {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .filter {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .filter .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7a858d;
    }

    select {
      appearance: none;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font-size: 1rem;
      font-family: inherit;
      background: white;
      color: var(--ink);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .chart-card h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    #cumulative-cases {
      width: 100%;
      height: 300px;
      display: block;
    }

    #cumulative-cases text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-bar {
      fill: var(--accent);
      opacity: 0.85;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a858d;
      font-size: 11px;
    }

    .status {
      font-size: 0.95rem;
      color: #5f6a72;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1 id="title">C19 Canada</h1>
      <button id="reload-button" type="button">Reload Page</button>
    </header>

    <div class="source-line">
      <a href="{{DATA_LINK_URL}}">Data source</a>
      <p id="last-fetched"></p>
    </div>

    <section class="filters">
      <div class="filter">
        <span class="label">Province</span>
        <select id="province-dropdown">
          <option value="">All provinces</option>
        </select>
      </div>
      <div class="filter">
        <span class="label">Region</span>
        <select id="region-dropdown">
          <option value="">All regions</option>
        </select>
      </div>
    </section>

    <section class="chart-card">
      <h2 id="chart-title">Cumulative Cases</h2>
      <svg id="cumulative-cases" viewBox="0 0 640 300" aria-label="Cumulative cases chart" role="img"></svg>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const provinceEl = document.getElementById('province-dropdown');
    const regionEl = document.getElementById('region-dropdown');
    const reloadEl = document.getElementById('reload-button');
    const lastFetchedEl = document.getElementById('last-fetched');
    const chartEl = document.getElementById('cumulative-cases');
    const chartTitleEl = document.getElementById('chart-title');
    const statusEl = document.getElementById('status');

    const state = { province: null, region: null };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const fetchJson = async (url) => {
      const res = await fetch(url);
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      return res.json();
    };

    const fillSelect = (select, options, placeholder, selected) => {
      select.innerHTML = '';
      const none = document.createElement('option');
      none.value = '';
      none.textContent = placeholder;
      select.appendChild(none);
      options.forEach((opt) => {
        const el = document.createElement('option');
        el.value = opt.value;
        el.textContent = opt.label;
        select.appendChild(el);
      });
      select.value = selected || '';
    };

    const renderChart = (points) => {
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
        return;
      }

      const width = 640;
      const height = 300;
      const paddingX = 48;
      const paddingY = 36;
      const top = 20;

      const max = Math.max(...points.map((p) => p.cumulative), 1);
      const innerWidth = width - paddingX * 2;
      const innerHeight = height - top - paddingY;
      const barWidth = innerWidth / points.length;
      const y = (value) => height - paddingY - (value / max) * innerHeight;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const bars = points
        .map((point, index) => {
          const x = paddingX + index * barWidth;
          const h = (point.cumulative / max) * innerHeight;
          return `<rect class="chart-bar" x="${(x + 0.5).toFixed(2)}" y="${y(point.cumulative).toFixed(2)}" width="${Math.max(barWidth - 1, 1).toFixed(2)}" height="${h.toFixed(2)}" />`;
        })
        .join('');

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      const labels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          const x = paddingX + index * barWidth + barWidth / 2;
          return `<text class="chart-label" x="${x.toFixed(2)}" y="${height - paddingY + 18}" text-anchor="middle">${point.date.slice(5)}</text>`;
        })
        .join('');

      chartEl.setAttribute('viewBox', `0 0 ${width} ${height}`);
      chartEl.innerHTML = `${grid}${bars}${labels}`;
    };

    const loadStatus = async () => {
      const data = await fetchJson('/api/status');
      lastFetchedEl.textContent = data.last_fetched;
    };

    const loadProvinces = async () => {
      const options = await fetchJson('/api/provinces');
      if (state.province && !options.some((o) => o.value === state.province)) {
        state.province = null;
        state.region = null;
      }
      fillSelect(provinceEl, options, 'All provinces', state.province);
    };

    const loadRegions = async () => {
      const url = state.province
        ? `/api/regions?province=${encodeURIComponent(state.province)}`
        : '/api/regions';
      const options = await fetchJson(url);
      fillSelect(regionEl, options, 'All regions', state.region);
    };

    const loadChart = async () => {
      const params = new URLSearchParams();
      if (state.province) {
        params.set('province', state.province);
      }
      if (state.region) {
        params.set('region', state.region);
      }
      const query = params.toString();
      const data = await fetchJson(query ? `/api/chart?${query}` : '/api/chart');
      chartTitleEl.textContent = data.title;
      renderChart(data.points);
    };

    const refresh = async () => {
      await Promise.all([loadStatus(), loadProvinces()]);
      await Promise.all([loadRegions(), loadChart()]);
    };

    provinceEl.addEventListener('change', () => {
      state.province = provinceEl.value || null;
      state.region = null;
      Promise.all([loadRegions(), loadChart()]).catch((err) => setStatus(err.message, 'error'));
    });

    regionEl.addEventListener('change', () => {
      state.region = regionEl.value || null;
      loadChart().catch((err) => setStatus(err.message, 'error'));
    });

    reloadEl.addEventListener('click', () => {
      refresh().catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
